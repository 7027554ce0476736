use learn164_shared::TestResult;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::ArrowUpDown;
use crate::listing::{LoadState, ResultColumn, SortOrder, sort_results, use_screen_token};

/// 成绩表页
///
/// 教师视角，按主题拉全部成绩。四列都可点：点当前列翻转方向，
/// 点新列换列并回到升序。排序同样走规范列表投影。
#[component]
pub fn TopicResultsPage(topic_id: i64) -> impl IntoView {
    let api = use_api();
    let token = use_screen_token();

    let (results, set_results) = signal(LoadState::<Vec<TestResult>>::Loading);
    let (view, set_view) = signal(Vec::<TestResult>::new());
    let (column, set_column) = signal(ResultColumn::Student);
    let (order, set_order) = signal(SortOrder::default());

    let reproject = move || {
        results.with_untracked(|state| {
            if let Some(items) = state.ready() {
                set_view.set(sort_results(
                    items,
                    column.get_untracked(),
                    order.get_untracked(),
                ));
            }
        });
    };

    let handle_sort = move |col: ResultColumn| {
        if column.get_untracked() == col {
            set_order.update(|o| *o = o.toggle());
        } else {
            set_column.set(col);
            set_order.set(SortOrder::Asc);
        }
        reproject();
    };

    Effect::new(move |_| {
        spawn_local(async move {
            let result = api.results_by_topic(topic_id).await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(data) => {
                    set_results.set(LoadState::Ready(data));
                    reproject();
                }
                Err(e) => {
                    set_results.set(LoadState::Failed(format!(
                        "Ошибка при загрузке результатов тестов: {}",
                        e
                    )));
                }
            }
        });
    });

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-6">
            <h1 class="text-3xl font-bold text-center">"Результаты тестов"</h1>

            {move || match results.get() {
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
                LoadState::Ready(items) => {
                    if items.is_empty() {
                        view! {
                            <p class="text-center opacity-60 py-12">
                                "Результатов пока нет"
                            </p>
                        }
                        .into_any()
                    } else {
                        view! {
                            <div class="overflow-x-auto">
                                <table class="table table-zebra bg-base-100 shadow-xl">
                                    <thead>
                                        <tr>
                                            <th
                                                class="cursor-pointer select-none"
                                                on:click=move |_| handle_sort(ResultColumn::Student)
                                            >
                                                <div class="flex items-center gap-1">
                                                    "Студент"
                                                    <ArrowUpDown attr:class="h-3 w-3 opacity-50" />
                                                </div>
                                            </th>
                                            <th
                                                class="cursor-pointer select-none"
                                                on:click=move |_| handle_sort(ResultColumn::Test)
                                            >
                                                <div class="flex items-center gap-1">
                                                    "Тест"
                                                    <ArrowUpDown attr:class="h-3 w-3 opacity-50" />
                                                </div>
                                            </th>
                                            <th
                                                class="cursor-pointer select-none"
                                                on:click=move |_| handle_sort(ResultColumn::Score)
                                            >
                                                <div class="flex items-center gap-1">
                                                    "Оценка"
                                                    <ArrowUpDown attr:class="h-3 w-3 opacity-50" />
                                                </div>
                                            </th>
                                            <th
                                                class="cursor-pointer select-none"
                                                on:click=move |_| handle_sort(ResultColumn::Date)
                                            >
                                                <div class="flex items-center gap-1">
                                                    "Дата"
                                                    <ArrowUpDown attr:class="h-3 w-3 opacity-50" />
                                                </div>
                                            </th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <For
                                            each=move || view.get()
                                            key=|r| r.id
                                            children=move |result: TestResult| {
                                                view! {
                                                    <tr>
                                                        <td>{result.user.full_name}</td>
                                                        <td>{result.test.title}</td>
                                                        <td>{result.score.to_string()}</td>
                                                        <td>{result.created_at.short()}</td>
                                                    </tr>
                                                }
                                            }
                                        />
                                    </tbody>
                                </table>
                            </div>
                        }
                        .into_any()
                    }
                }
            }}
        </div>
    }
}
