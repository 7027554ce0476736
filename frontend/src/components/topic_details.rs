use learn164_shared::{Lesson, NewLesson, TestResult, TestSummary, Topic};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiError, use_api};
use crate::auth::use_session;
use crate::components::icons::{BookOpen, FileText, Plus};
use crate::listing::{LoadState, use_screen_token};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

fn fetch_failed(e: ApiError) -> String {
    format!("Ошибка при загрузке данных: {}", e)
}

/// 主题详情页
///
/// 主题本身没有单独接口，从课程主题列表里按 id 挑出来，找不到
/// 就进失败态。讲座和测验随后串行拉取。点「пройти тест」先查
/// 该测验的已有成绩，再弹对话框：有成绩显示分数且不允许重考，
/// 没有就放行进答题页。
#[component]
pub fn TopicDetailsPage(course_id: i64, topic_id: i64) -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let router = use_router();
    let token = use_screen_token();

    let is_instructor = session.is_instructor_signal();

    let (state, set_state) = signal(LoadState::<(Topic, Vec<Lesson>, Vec<TestSummary>)>::Loading);
    let (result_dialog, set_result_dialog) = signal(Option::<(TestSummary, Option<TestResult>)>::None);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let load = move || {
        set_state.set(LoadState::Loading);
        spawn_local(async move {
            let result = async {
                let topics = api.topics(course_id).await.map_err(fetch_failed)?;
                let topic = topics
                    .into_iter()
                    .find(|t| t.id == topic_id)
                    .ok_or_else(|| "Тема не найдена".to_string())?;
                let lessons = api.lessons(topic_id).await.map_err(fetch_failed)?;
                let tests = api.tests(topic_id).await.map_err(fetch_failed)?;
                Ok::<_, String>((topic, lessons, tests))
            }
            .await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(data) => set_state.set(LoadState::Ready(data)),
                Err(msg) => set_state.set(LoadState::Failed(msg)),
            }
        });
    };

    Effect::new(move |_| load());

    let handle_add_lesson = move |new_lesson: NewLesson| {
        spawn_local(async move {
            let result = api.create_lesson(&new_lesson).await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(lesson) => {
                    set_notification.set(Some(("Лекция добавлена".to_string(), false)));
                    set_state.update(|s| {
                        if let LoadState::Ready((_, lessons, _)) = s {
                            lessons.push(lesson);
                        }
                    });
                }
                Err(e) => {
                    set_notification
                        .set(Some((format!("Ошибка при добавлении лекции: {}", e), true)));
                }
            }
        });
    };

    // 先查已有成绩再开对话框；查询失败一律按「暂无成绩」处理
    let handle_test_click = move |test: TestSummary| {
        spawn_local(async move {
            let outcome = api.result_by_test(test.id).await;
            if token.is_cancelled() {
                return;
            }
            set_result_dialog.set(Some((test, outcome.ok())));
        });
    };

    // result_dialog 信号与 <dialog> 元素状态同步
    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if result_dialog.get().is_some() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

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
                LoadState::Ready((topic, lessons, tests)) => {
                    let lessons_empty = lessons.is_empty();
                    let tests_empty = tests.is_empty();
                    view! {
                        <div class="space-y-6">
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <div class="flex justify-between items-start gap-2">
                                        <h1 class="card-title text-3xl">{topic.title}</h1>
                                        <Show when=move || is_instructor.get()>
                                            <button
                                                class="btn btn-outline btn-sm"
                                                on:click=move |_| {
                                                    router.navigate(AppRoute::TopicResults { topic_id })
                                                }
                                            >
                                                "Результаты"
                                            </button>
                                        </Show>
                                    </div>
                                    <p class="opacity-80">{topic.description}</p>
                                    <p class="text-sm">
                                        "Дата создания: "
                                        {topic.created_at.short()}
                                    </p>
                                </div>
                            </div>

                            <div class="flex justify-between items-center">
                                <h2 class="text-2xl font-bold">"Лекции"</h2>
                                <Show when=move || is_instructor.get()>
                                    <AddLectureDialog topic_id=topic_id on_add=handle_add_lesson />
                                </Show>
                            </div>
                            {lessons_empty.then(|| view! {
                                <p class="opacity-60">"Лекций пока нет"</p>
                            })}
                            <div class="space-y-2">
                                {lessons
                                    .into_iter()
                                    .map(|lesson: Lesson| view! {
                                        <div class="card bg-base-100 shadow">
                                            <div class="card-body py-4 flex-row items-center justify-between">
                                                <div class="flex items-center gap-3">
                                                    <BookOpen attr:class="h-5 w-5 text-primary" />
                                                    <h3 class="font-semibold">{lesson.title}</h3>
                                                </div>
                                                <a
                                                    class="btn btn-outline btn-sm"
                                                    href=lesson.file_url
                                                    target="_blank"
                                                    rel="noopener noreferrer"
                                                >
                                                    "Открыть лекцию"
                                                </a>
                                            </div>
                                        </div>
                                    })
                                    .collect_view()}
                            </div>

                            <div class="flex justify-between items-center">
                                <h2 class="text-2xl font-bold">"Тесты"</h2>
                                <Show when=move || is_instructor.get()>
                                    <button
                                        class="btn btn-primary btn-sm gap-2"
                                        on:click=move |_| {
                                            router.navigate(AppRoute::AddTest {
                                                topic_id,
                                                course_id: Some(course_id),
                                            })
                                        }
                                    >
                                        <Plus attr:class="h-4 w-4" />
                                        "Добавить тест"
                                    </button>
                                </Show>
                            </div>
                            {tests_empty.then(|| view! {
                                <p class="opacity-60">"Тестов пока нет"</p>
                            })}
                            <div class="space-y-2">
                                {tests
                                    .into_iter()
                                    .map(|test: TestSummary| {
                                        let test_for_click = test.clone();
                                        view! {
                                            <div class="card bg-base-100 shadow">
                                                <div class="card-body py-4 flex-row items-center justify-between">
                                                    <div class="flex items-center gap-3">
                                                        <FileText attr:class="h-5 w-5 text-primary" />
                                                        <div>
                                                            <h3 class="font-semibold">{test.title}</h3>
                                                            {test.description.map(|d| view! {
                                                                <p class="text-sm opacity-70">{d}</p>
                                                            })}
                                                        </div>
                                                    </div>
                                                    <button
                                                        class="btn btn-primary btn-sm"
                                                        on:click=move |_| {
                                                            handle_test_click(test_for_click.clone())
                                                        }
                                                    >
                                                        "Пройти тест"
                                                    </button>
                                                </div>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}

            // 成绩确认对话框：有成绩只展示，无成绩放行答题
            <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_result_dialog.set(None)>
                <div class="modal-box">
                    {move || result_dialog.get().map(|(test, result)| {
                        let test_id = test.id;
                        let taken = result.is_some();
                        view! {
                            <h3 class="font-bold text-lg">{test.title}</h3>
                            {result.map(|r| view! {
                                <div class="alert alert-info mt-4">
                                    <span>{format!("Ваш результат: {}", r.score)}</span>
                                </div>
                            })}
                            <div class="modal-action">
                                <button
                                    type="button"
                                    class="btn btn-ghost"
                                    on:click=move |_| set_result_dialog.set(None)
                                >
                                    "Отмена"
                                </button>
                                <button
                                    class="btn btn-primary"
                                    disabled=taken
                                    on:click=move |_| {
                                        router.navigate(AppRoute::TestPage { test_id })
                                    }
                                >
                                    "Начать тест"
                                </button>
                            </div>
                        }
                    })}
                </div>
                <form method="dialog" class="modal-backdrop">
                    <button>"close"</button>
                </form>
            </dialog>
        </div>
    }
}

/// 添加讲座对话框；主题 id 由详情页注入
#[component]
fn AddLectureDialog(topic_id: i64, #[prop(into)] on_add: Callback<NewLesson>) -> impl IntoView {
    let (open, set_open) = signal(false);
    let (title, set_title) = signal(String::new());
    let (file_url, set_file_url) = signal(String::new());
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
        on_add.run(NewLesson {
            title: title.get(),
            file_url: file_url.get(),
            topic_id,
        });
        set_open.set(false);
        set_title.set(String::new());
        set_file_url.set(String::new());
    };

    view! {
        <button class="btn btn-primary btn-sm gap-2" on:click=move |_| set_open.set(true)>
            <Plus attr:class="h-4 w-4" />
            "Добавить лекцию"
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Добавить новую лекцию"</h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <div class="form-control">
                        <label for="lesson_title" class="label">
                            <span class="label-text">"Название лекции"</span>
                        </label>
                        <input
                            id="lesson_title"
                            required
                            type="text"
                            placeholder="Введение в тему"
                            on:input=move |ev| set_title.set(event_target_value(&ev))
                            prop:value=title
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label for="lesson_url" class="label">
                            <span class="label-text">"Ссылка на лекцию"</span>
                        </label>
                        <input
                            id="lesson_url"
                            required
                            type="url"
                            placeholder="https://..."
                            on:input=move |ev| set_file_url.set(event_target_value(&ev))
                            prop:value=file_url
                            class="input input-bordered w-full"
                        />
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
