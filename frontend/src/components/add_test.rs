use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::authoring::{TestDraft, ValidationRules};
use crate::components::icons::{Plus, Trash2};
use crate::listing::use_screen_token;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 出题页
///
/// 草稿树放在一个信号里，列表渲染按草稿自带的 uid 作键，
/// 事件处理先按 uid 回查当前位置再改树，删除重排后键不变、
/// 输入框状态不串行。保存时整树校验，第一处问题顶在表单上方。
#[component]
pub fn AddTestPage(topic_id: i64, course_id: Option<i64>) -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let token = use_screen_token();

    let draft = RwSignal::new(TestDraft::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (is_saving, set_is_saving) = signal(false);

    // 返回入口页；没有课程 id（直接刷到本页）就退回首页
    let back_route = move || {
        course_id
            .map(|cid| AppRoute::TopicDetails {
                course_id: cid,
                id: topic_id,
            })
            .unwrap_or(AppRoute::Genres)
    };

    let handle_save = move |_| {
        let request =
            draft.with_untracked(|d| d.to_request(topic_id, &ValidationRules::default()));
        match request {
            Ok(request) => {
                set_error_msg.set(None);
                set_is_saving.set(true);
                spawn_local(async move {
                    let result = api.create_test(&request).await;
                    if token.is_cancelled() {
                        return;
                    }
                    set_is_saving.set(false);
                    match result {
                        Ok(()) => router.navigate(back_route()),
                        Err(e) => {
                            web_sys::console::error_1(
                                &format!("[AddTest] create failed: {}", e).into(),
                            );
                            set_error_msg
                                .set(Some(format!("Ошибка при создании теста: {}", e)));
                        }
                    }
                });
            }
            Err(e) => set_error_msg.set(Some(e.to_string())),
        }
    };

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8 space-y-6">
            <h1 class="text-3xl font-bold text-center">"Добавить новый тест"</h1>

            <div class="form-control">
                <label for="test_title" class="label">
                    <span class="label-text">"Название теста"</span>
                </label>
                <input
                    id="test_title"
                    required
                    type="text"
                    placeholder="Итоговый тест по теме"
                    class="input input-bordered w-full"
                    prop:value=move || draft.with(|d| d.title.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.title = value);
                    }
                />
            </div>

            <For
                each=move || draft.with(|d| d.questions.iter().map(|q| q.uid).collect::<Vec<u64>>())
                key=|uid| *uid
                children=move |quid: u64| {
                    // 派生信号按 uid 回查位置，删除重排不影响其余行
                    let number = Signal::derive(move || {
                        draft.with(|d| {
                            d.questions
                                .iter()
                                .position(|q| q.uid == quid)
                                .map_or(0, |i| i + 1)
                        })
                    });
                    let text = Signal::derive(move || {
                        draft.with(|d| {
                            d.questions
                                .iter()
                                .find(|q| q.uid == quid)
                                .map(|q| q.text.clone())
                                .unwrap_or_default()
                        })
                    });
                    view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body space-y-4">
                                <div class="flex justify-between items-center">
                                    <h2 class="card-title">
                                        {move || format!("Вопрос {}", number.get())}
                                    </h2>
                                    <button
                                        class="btn btn-ghost btn-sm btn-circle text-error"
                                        on:click=move |_| {
                                            draft.update(|d| {
                                                if let Some(index) =
                                                    d.questions.iter().position(|q| q.uid == quid)
                                                {
                                                    d.remove_question(index);
                                                }
                                            });
                                        }
                                    >
                                        <Trash2 attr:class="h-4 w-4" />
                                    </button>
                                </div>

                                <div class="form-control">
                                    <label class="label">
                                        <span class="label-text">"Текст вопроса"</span>
                                    </label>
                                    <input
                                        required
                                        type="text"
                                        placeholder="Сформулируйте вопрос"
                                        class="input input-bordered w-full"
                                        prop:value=text
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            draft.update(|d| {
                                                if let Some(index) =
                                                    d.questions.iter().position(|q| q.uid == quid)
                                                {
                                                    d.set_question_text(index, value);
                                                }
                                            });
                                        }
                                    />
                                </div>

                                <div class="space-y-2">
                                    <For
                                        each=move || {
                                            draft.with(|d| {
                                                d.questions
                                                    .iter()
                                                    .find(|q| q.uid == quid)
                                                    .map(|q| {
                                                        q.answers
                                                            .iter()
                                                            .map(|a| a.uid)
                                                            .collect::<Vec<u64>>()
                                                    })
                                                    .unwrap_or_default()
                                            })
                                        }
                                        key=|uid| *uid
                                        children=move |auid: u64| {
                                            let lookup = move |d: &TestDraft| {
                                                d.questions
                                                    .iter()
                                                    .position(|q| q.uid == quid)
                                                    .and_then(|qi| {
                                                        d.questions[qi]
                                                            .answers
                                                            .iter()
                                                            .position(|a| a.uid == auid)
                                                            .map(|ai| (qi, ai))
                                                    })
                                            };
                                            let number = Signal::derive(move || {
                                                draft.with(|d| {
                                                    lookup(d).map_or(0, |(_, ai)| ai + 1)
                                                })
                                            });
                                            let text = Signal::derive(move || {
                                                draft.with(|d| {
                                                    lookup(d)
                                                        .map(|(qi, ai)| {
                                                            d.questions[qi].answers[ai]
                                                                .text
                                                                .clone()
                                                        })
                                                        .unwrap_or_default()
                                                })
                                            });
                                            let is_correct = Signal::derive(move || {
                                                draft.with(|d| {
                                                    lookup(d)
                                                        .map(|(qi, ai)| {
                                                            d.questions[qi].answers[ai].is_correct
                                                        })
                                                        .unwrap_or(false)
                                                })
                                            });
                                            view! {
                                                <div class="flex items-center gap-2">
                                                    <input
                                                        required
                                                        type="text"
                                                        class="input input-bordered input-sm flex-1"
                                                        placeholder=move || {
                                                            format!("Ответ {}", number.get())
                                                        }
                                                        prop:value=text
                                                        on:input=move |ev| {
                                                            let value = event_target_value(&ev);
                                                            draft.update(|d| {
                                                                if let Some((qi, ai)) = lookup(d) {
                                                                    d.set_answer_text(qi, ai, value);
                                                                }
                                                            });
                                                        }
                                                    />
                                                    <button
                                                        class=move || {
                                                            if is_correct.get() {
                                                                "btn btn-success btn-sm"
                                                            } else {
                                                                "btn btn-outline btn-sm"
                                                            }
                                                        }
                                                        on:click=move |_| {
                                                            draft.update(|d| {
                                                                if let Some((qi, ai)) = lookup(d) {
                                                                    d.toggle_correct(qi, ai);
                                                                }
                                                            });
                                                        }
                                                    >
                                                        {move || {
                                                            if is_correct.get() {
                                                                "Правильный"
                                                            } else {
                                                                "Неверный"
                                                            }
                                                        }}
                                                    </button>
                                                    <button
                                                        class="btn btn-ghost btn-sm btn-circle text-error"
                                                        on:click=move |_| {
                                                            draft.update(|d| {
                                                                if let Some((qi, ai)) = lookup(d) {
                                                                    d.remove_answer(qi, ai);
                                                                }
                                                            });
                                                        }
                                                    >
                                                        <Trash2 attr:class="h-4 w-4" />
                                                    </button>
                                                </div>
                                            }
                                        }
                                    />
                                </div>

                                <button
                                    class="btn btn-outline btn-sm gap-2 self-start"
                                    on:click=move |_| {
                                        draft.update(|d| {
                                            if let Some(index) =
                                                d.questions.iter().position(|q| q.uid == quid)
                                            {
                                                d.add_answer(index);
                                            }
                                        });
                                    }
                                >
                                    <Plus attr:class="h-4 w-4" />
                                    "Добавить ответ"
                                </button>
                            </div>
                        </div>
                    }
                }
            />

            <button
                class="btn btn-primary gap-2"
                on:click=move |_| draft.update(|d| d.add_question())
            >
                <Plus attr:class="h-4 w-4" />
                "Добавить вопрос"
            </button>

            {move || error_msg.get().map(|msg| view! {
                <div role="alert" class="alert alert-error">
                    <span>{msg}</span>
                </div>
            })}

            <div class="flex justify-end gap-2">
                <button class="btn btn-ghost" on:click=move |_| router.navigate(back_route())>
                    "Отмена"
                </button>
                <button
                    class="btn btn-primary"
                    disabled=move || is_saving.get()
                    on:click=handle_save
                >
                    {move || if is_saving.get() {
                        view! {
                            <span class="loading loading-spinner"></span>
                            " Сохранение..."
                        }
                        .into_any()
                    } else {
                        view! { "Сохранить тест" }.into_any()
                    }}
                </button>
            </div>
        </div>
    }
}
