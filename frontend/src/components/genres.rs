use learn164_shared::Genre;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::use_session;
use crate::components::icons::{ArrowUpDown, Plus, Search};
use crate::listing::{LoadState, SortOrder, append_created, project, use_screen_token};
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

/// 首页：学科列表
///
/// 规范列表装拉取结果，视图列表由搜索与排序控件投影得出。
/// 点学科卡片带着 genreId 跳课程页。
#[component]
pub fn GenresPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let navigate = use_navigate();
    let token = use_screen_token();

    let is_instructor = session.is_instructor_signal();

    let (genres, set_genres) = signal(LoadState::<Vec<Genre>>::Loading);
    let (view, set_view) = signal(Vec::<Genre>::new());
    let (search, set_search) = signal(String::new());
    let (order, set_order) = signal(SortOrder::default());
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错

    // 控件变化后对规范列表重新投影
    let reproject = move || {
        genres.with_untracked(|state| {
            if let Some(items) = state.ready() {
                set_view.set(project(
                    items,
                    &search.get_untracked(),
                    order.get_untracked(),
                    |g: &Genre| g.name.as_str(),
                ));
            }
        });
    };

    let load = move || {
        set_genres.set(LoadState::Loading);
        spawn_local(async move {
            let result = api.genres().await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(data) => {
                    set_genres.set(LoadState::Ready(data));
                    reproject();
                }
                Err(e) => {
                    set_genres.set(LoadState::Failed(format!(
                        "Ошибка при загрузке данных: {}",
                        e
                    )));
                }
            }
        });
    };

    // 初始加载
    Effect::new(move |_| load());

    let handle_add_genre = move |name: String| {
        spawn_local(async move {
            let result = api.create_genre(name).await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(genre) => {
                    set_notification.set(Some(("Жанр добавлен".to_string(), false)));
                    set_genres.update(|canonical| {
                        if let LoadState::Ready(items) = canonical {
                            set_view.update(|view| append_created(items, view, genre));
                        }
                    });
                }
                Err(e) => {
                    set_notification
                        .set(Some((format!("Ошибка при добавлении жанра: {}", e), true)));
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
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-6">
            // 通知提示框
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

            <h1 class="text-3xl font-bold text-center">"Выберите жанр"</h1>

            <div class="flex flex-col md:flex-row gap-2 justify-center items-center">
                <label class="input input-bordered flex items-center gap-2 w-full max-w-md">
                    <Search attr:class="h-4 w-4 opacity-50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Поиск жанров..."
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
                    <AddGenreDialog on_add=handle_add_genre />
                </Show>
            </div>

            {move || match genres.get() {
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
                LoadState::Ready(_) => {
                    let navigate = navigate.clone();
                    view! {
                        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
                            <For
                                each=move || view.get()
                                key=|g| g.id
                                children=move |genre: Genre| {
                                    let id = genre.id;
                                    let navigate = navigate.clone();
                                    view! {
                                        <div
                                            class="card bg-primary text-primary-content shadow-xl cursor-pointer hover:scale-105 transition-transform"
                                            on:click=move |_| {
                                                navigate(AppRoute::Courses { genre_id: Some(id) })
                                            }
                                        >
                                            <div class="card-body">
                                                <h2 class="card-title">{genre.name}</h2>
                                            </div>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

/// 添加学科对话框；提交后把名称交给父组件调接口
#[component]
fn AddGenreDialog(#[prop(into)] on_add: Callback<String>) -> impl IntoView {
    let (open, set_open) = signal(false);
    let (name, set_name) = signal(String::new());
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
        on_add.run(name.get());
        set_open.set(false);
        set_name.set(String::new());
    };

    view! {
        // 触发按钮
        <button class="btn btn-primary gap-2" on:click=move |_| set_open.set(true)>
            <Plus attr:class="h-4 w-4" />
            "Добавить жанр"
        </button>

        // 模态框内容
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Добавить новый жанр"</h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <div class="form-control">
                        <label for="genre_name" class="label">
                            <span class="label-text">"Название жанра"</span>
                        </label>
                        <input
                            id="genre_name"
                            required
                            type="text"
                            placeholder="Математика"
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                            prop:value=name
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
