use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::listing::use_screen_token;
use crate::taking::{TakePhase, TestAttempt};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 答题页
///
/// 整页跟着 [`TakePhase`] 走：拉题、答题、交卷后展示成绩。
/// 每次选择都重建答题视图，单选框状态直接由快照算出，不依赖
/// DOM 残留。交卷按钮到全部答完才解锁。
#[component]
pub fn TakeTestPage(test_id: i64) -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let token = use_screen_token();

    let (phase, set_phase) = signal(TakePhase::Loading);
    let (is_submitting, set_is_submitting) = signal(false);

    Effect::new(move |_| {
        spawn_local(async move {
            let result = api.test_questions(test_id).await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(questions) => {
                    set_phase.set(TakePhase::Answering(TestAttempt::new(questions)));
                }
                Err(e) => {
                    set_phase.set(TakePhase::Failed(format!(
                        "Ошибка при загрузке вопросов теста: {}",
                        e
                    )));
                }
            }
        });
    });

    let handle_select = move |question_id: i64, answer_id: i64| {
        set_phase.update(|p| {
            if let TakePhase::Answering(attempt) = p {
                attempt.select(question_id, answer_id);
            }
        });
    };

    let handle_submit = move || {
        let submission = phase.with_untracked(|p| match p {
            TakePhase::Answering(attempt) if attempt.is_complete() => {
                Some(attempt.to_submission())
            }
            _ => None,
        });
        let Some(body) = submission else {
            return;
        };
        set_is_submitting.set(true);
        spawn_local(async move {
            let result = api.submit_test(test_id, body).await;
            if token.is_cancelled() {
                return;
            }
            set_is_submitting.set(false);
            match result {
                Ok(outcome) => set_phase.set(TakePhase::Submitted(outcome)),
                Err(e) => {
                    set_phase.set(TakePhase::Failed(format!(
                        "Ошибка при отправке ответов: {}",
                        e
                    )));
                }
            }
        });
    };

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8">
            {move || match phase.get() {
                TakePhase::Loading => view! {
                    <div class="flex justify-center py-12">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
                .into_any(),
                TakePhase::Failed(msg) => view! {
                    <div role="alert" class="alert alert-error max-w-md mx-auto">
                        <span>{msg}</span>
                    </div>
                }
                .into_any(),
                TakePhase::Answering(attempt) => {
                    let answered = attempt.answered_count();
                    let total = attempt.total();
                    let complete = attempt.is_complete();
                    let cards = attempt
                        .questions()
                        .iter()
                        .enumerate()
                        .map(|(index, question)| {
                            let qid = question.id;
                            let selected = attempt.selected(qid);
                            let name = format!("question-{}", qid);
                            view! {
                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <h2 class="card-title">
                                            {format!("{}. {}", index + 1, question.text)}
                                        </h2>
                                        <div class="space-y-2">
                                            {question
                                                .answers
                                                .iter()
                                                .map(|answer| {
                                                    let aid = answer.id;
                                                    view! {
                                                        <label class="label cursor-pointer justify-start gap-3">
                                                            <input
                                                                type="radio"
                                                                class="radio radio-primary"
                                                                name=name.clone()
                                                                prop:checked=selected == Some(aid)
                                                                on:change=move |_| handle_select(qid, aid)
                                                            />
                                                            <span class="label-text">{answer.text.clone()}</span>
                                                        </label>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view();
                    view! {
                        <div class="space-y-6">
                            <h1 class="text-3xl font-bold text-center">
                                "Прохождение теста"
                            </h1>
                            {cards}
                            <div class="flex justify-between items-center">
                                <span class="opacity-70">
                                    {format!("Отвечено: {} из {}", answered, total)}
                                </span>
                                <button
                                    class="btn btn-primary"
                                    disabled=move || is_submitting.get() || !complete
                                    on:click=move |_| handle_submit()
                                >
                                    {move || if is_submitting.get() {
                                        view! {
                                            <span class="loading loading-spinner"></span>
                                            " Отправка..."
                                        }
                                        .into_any()
                                    } else {
                                        view! { "Завершить тест" }.into_any()
                                    }}
                                </button>
                            </div>
                        </div>
                    }
                    .into_any()
                }
                TakePhase::Submitted(result) => {
                    let course_id = result.test.course_id;
                    view! {
                        <div class="max-w-lg mx-auto">
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body items-center text-center space-y-2">
                                    <h1 class="card-title text-2xl">"Результат теста"</h1>
                                    <p>"Тест: " {result.test.title}</p>
                                    <p>"Пользователь: " {result.user.full_name}</p>
                                    <p class="text-xl font-bold">
                                        "Оценка: " {result.score.to_string()}
                                    </p>
                                    <div class="card-actions">
                                        <button
                                            class="btn btn-primary"
                                            on:click=move |_| {
                                                router.navigate(AppRoute::CourseDetails {
                                                    id: course_id,
                                                })
                                            }
                                        >
                                            "Вернуться к курсу"
                                        </button>
                                    </div>
                                </div>
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
