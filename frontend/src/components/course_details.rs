use learn164_shared::{Course, NewTopic, Topic};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiError, use_api};
use crate::auth::use_session;
use crate::components::icons::{ArrowUpDown, Plus, Search};
use crate::listing::{LoadState, SortOrder, append_created, project, use_screen_token};
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

/// 课程详情页
///
/// 课程与主题串行拉取，任一失败整页进失败态。报名成功后重拉
/// 课程并原地替换元组里的课程槽，主题列表不动。未报名时主题
/// 行不可点。
#[component]
pub fn CourseDetailsPage(id: i64) -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let navigate = use_navigate();
    let token = use_screen_token();

    let is_instructor = session.is_instructor_signal();

    let (state, set_state) = signal(LoadState::<(Course, Vec<Topic>)>::Loading);
    let (view, set_view) = signal(Vec::<Topic>::new());
    let (search, set_search) = signal(String::new());
    let (order, set_order) = signal(SortOrder::default());
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    let reproject = move || {
        state.with_untracked(|s| {
            if let Some((_, topics)) = s.ready() {
                set_view.set(project(
                    topics,
                    &search.get_untracked(),
                    order.get_untracked(),
                    |t: &Topic| t.title.as_str(),
                ));
            }
        });
    };

    let load = move || {
        set_state.set(LoadState::Loading);
        spawn_local(async move {
            let result = async {
                let course = api.course(id).await?;
                let topics = api.topics(id).await?;
                Ok::<_, ApiError>((course, topics))
            }
            .await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(data) => {
                    set_state.set(LoadState::Ready(data));
                    reproject();
                }
                Err(e) => {
                    set_state.set(LoadState::Failed(format!(
                        "Ошибка при загрузке данных: {}",
                        e
                    )));
                }
            }
        });
    };

    Effect::new(move |_| load());

    // 报名后重拉课程拿到服务端填好的报名字段
    let handle_enroll = move || {
        spawn_local(async move {
            let result = async {
                api.enroll(id).await?;
                api.course(id).await
            }
            .await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(course) => {
                    set_state.update(|s| {
                        if let LoadState::Ready((slot, _)) = s {
                            *slot = course;
                        }
                    });
                }
                Err(e) => {
                    set_notification
                        .set(Some((format!("Ошибка при записи на курс: {}", e), true)));
                }
            }
        });
    };

    let handle_add_topic = move |new_topic: NewTopic| {
        spawn_local(async move {
            let result = api.create_topic(&new_topic).await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(topic) => {
                    set_notification.set(Some(("Тема добавлена".to_string(), false)));
                    set_state.update(|s| {
                        if let LoadState::Ready((_, topics)) = s {
                            set_view.update(|view| append_created(topics, view, topic));
                        }
                    });
                }
                Err(e) => {
                    set_notification
                        .set(Some((format!("Ошибка при добавлении темы: {}", e), true)));
                }
            }
        });
    };

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-6">
            <Show when=move || notification.get().is_some()>
                <div class="toast toast-top toast-end z-50">
                    <div class=move || {
                        let (_, is_err) = notification.get().unwrap();
                        if is_err {
                            "alert alert-error shadow-lg"
                        } else {
                            "alert alert-success shadow-lg"
                        }
                    }>
                        <span>{move || notification.get().unwrap().0}</span>
                    </div>
                </div>
            </Show>

            {move || match state.get() {
                LoadState::Loading => view! {
                    <div class="flex justify-center py-12">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
                .into_any(),
                LoadState::Failed(msg) => view! {
                    <div role="alert" class="alert alert-error max-w-md mx-auto">
                        <span>{msg}</span>
                    </div>
                }
                .into_any(),
                LoadState::Ready((course, _)) => {
                    let navigate = navigate.clone();
                    let enrolled = course.is_user_enrolled_in_course;
                    let enrolled_label = course
                        .enrolled_since()
                        .map(|date| format!("Вы записаны на курс с {}", date.short()));
                    let genre_label = course
                        .genre
                        .as_ref()
                        .map(|g| g.name.clone())
                        .unwrap_or_else(|| "Без жанра".to_string());
                    view! {
                        <div class="space-y-6">
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <h1 class="card-title text-3xl">{course.title}</h1>
                                    <p class="opacity-80">{course.description}</p>
                                    <p class="text-sm">
                                        "Преподаватель: "
                                        {course.instructor.full_name}
                                    </p>
                                    <p class="text-sm">"Жанр: " {genre_label}</p>
                                    <p class="text-sm">
                                        "Дата создания: "
                                        {course.created_at.short()}
                                    </p>
                                    {match enrolled_label {
                                        Some(label) => view! {
                                            <div class="alert alert-success mt-2">
                                                <span>{label}</span>
                                            </div>
                                        }
                                        .into_any(),
                                        None => view! {
                                            <div class="card-actions mt-2">
                                                <button
                                                    class="btn btn-primary"
                                                    on:click=move |_| handle_enroll()
                                                >
                                                    "Записаться на курс"
                                                </button>
                                            </div>
                                        }
                                        .into_any(),
                                    }}
                                </div>
                            </div>

                            <div class="flex flex-col md:flex-row gap-2 justify-between items-center">
                                <h2 class="text-2xl font-bold">"Темы курса"</h2>
                                <div class="flex gap-2 items-center flex-wrap">
                                    <label class="input input-bordered flex items-center gap-2">
                                        <Search attr:class="h-4 w-4 opacity-50" />
                                        <input
                                            type="text"
                                            class="grow"
                                            placeholder="Поиск тем..."
                                            prop:value=search
                                            on:input=move |ev| {
                                                set_search.set(event_target_value(&ev));
                                                reproject();
                                            }
                                        />
                                    </label>
                                    <button
                                        class="btn btn-primary gap-2"
                                        on:click=move |_| {
                                            set_order.update(|o| *o = o.toggle());
                                            reproject();
                                        }
                                    >
                                        <ArrowUpDown attr:class="h-4 w-4" />
                                        {move || order.get().label()}
                                    </button>
                                    <Show when=move || is_instructor.get()>
                                        <AddTopicDialog course_id=id on_add=handle_add_topic />
                                    </Show>
                                </div>
                            </div>

                            <div class="space-y-2">
                                <For
                                    each=move || view.get()
                                    key=|t| t.id
                                    children=move |topic: Topic| {
                                        let topic_id = topic.id;
                                        let navigate = navigate.clone();
                                        let class = if enrolled {
                                            "card bg-base-100 shadow cursor-pointer hover:shadow-lg transition-shadow"
                                        } else {
                                            "card bg-base-100 shadow opacity-60"
                                        };
                                        view! {
                                            <div
                                                class=class
                                                on:click=move |_| {
                                                    if enrolled {
                                                        navigate(AppRoute::TopicDetails {
                                                            course_id: id,
                                                            id: topic_id,
                                                        });
                                                    }
                                                }
                                            >
                                                <div class="card-body py-4">
                                                    <h3 class="card-title text-lg">{topic.title}</h3>
                                                    <p class="text-sm opacity-70">{topic.description}</p>
                                                </div>
                                            </div>
                                        }
                                    }
                                />
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

/// 添加主题对话框；课程 id 由详情页注入
#[component]
fn AddTopicDialog(course_id: i64, #[prop(into)] on_add: Callback<NewTopic>) -> impl IntoView {
    let (open, set_open) = signal(false);
    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_add.run(NewTopic {
            title: title.get(),
            description: description.get(),
            course_id,
        });
        set_open.set(false);
        set_title.set(String::new());
        set_description.set(String::new());
    };

    view! {
        <button class="btn btn-primary gap-2" on:click=move |_| set_open.set(true)>
            <Plus attr:class="h-4 w-4" />
            "Добавить тему"
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Добавить новую тему"</h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <div class="form-control">
                        <label for="topic_title" class="label">
                            <span class="label-text">"Название темы"</span>
                        </label>
                        <input
                            id="topic_title"
                            required
                            type="text"
                            placeholder="Квадратные уравнения"
                            on:input=move |ev| set_title.set(event_target_value(&ev))
                            prop:value=title
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label for="topic_description" class="label">
                            <span class="label-text">"Описание темы"</span>
                        </label>
                        <textarea
                            id="topic_description"
                            required
                            placeholder="Краткое описание темы"
                            on:input=move |ev| set_description.set(event_target_value(&ev))
                            prop:value=description
                            class="textarea textarea-bordered w-full"
                        ></textarea>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_open.set(false)>
                            "Отмена"
                        </button>
                        <button type="submit" class="btn btn-primary">
                            "Сохранить"
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
