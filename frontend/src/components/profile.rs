use learn164_shared::{Course, Role, TestResult, User};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiError, use_api};
use crate::components::icons::User as UserIcon;
use crate::listing::{LoadState, use_screen_token};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 角色的界面文案
fn role_label(role: &Role) -> &'static str {
    match role {
        Role::Instructor => "Преподаватель",
        Role::Student => "Студент",
        Role::Unknown => "Неизвестная роль",
    }
}

/// 个人页
///
/// 三段数据串行拉取：当前用户、已交卷的成绩、已报名的课程。
/// 课程卡可点进详情，成绩只展示。
#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let token = use_screen_token();

    let (state, set_state) = signal(LoadState::<(User, Vec<TestResult>, Vec<Course>)>::Loading);

    Effect::new(move |_| {
        spawn_local(async move {
            let result = async {
                let user = api.current_user().await?;
                let results = api.all_results().await?;
                let courses = api.enrollments().await?;
                Ok::<_, ApiError>((user, results, courses))
            }
            .await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(data) => set_state.set(LoadState::Ready(data)),
                Err(e) => {
                    set_state.set(LoadState::Failed(format!(
                        "Ошибка при загрузке данных: {}",
                        e
                    )));
                }
            }
        });
    });

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8">
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
                LoadState::Ready((user, results, courses)) => {
                    let results_empty = results.is_empty();
                    let courses_empty = courses.is_empty();
                    view! {
                        <div class="space-y-6">
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <div class="flex items-center gap-4">
                                        <div class="p-3 bg-primary/10 rounded-full">
                                            <UserIcon attr:class="h-8 w-8 text-primary" />
                                        </div>
                                        <div>
                                            <h1 class="card-title text-2xl">{user.full_name}</h1>
                                            <p class="text-sm">"Email: " {user.email}</p>
                                            <div class="badge badge-primary mt-1">
                                                {role_label(&user.role)}
                                            </div>
                                        </div>
                                    </div>
                                </div>
                            </div>

                            <h2 class="text-2xl font-bold">"Пройденные тесты"</h2>
                            {results_empty.then(|| view! {
                                <p class="opacity-60">"Пройденных тестов пока нет"</p>
                            })}
                            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                                {results
                                    .into_iter()
                                    .map(|result: TestResult| view! {
                                        <div class="card bg-base-100 shadow">
                                            <div class="card-body py-4">
                                                <h3 class="font-semibold">{result.test.title}</h3>
                                                <p class="text-sm">
                                                    "Результат: "
                                                    {result.score.to_string()}
                                                </p>
                                                <p class="text-sm opacity-70">
                                                    "Дата прохождения: "
                                                    {result.created_at.short()}
                                                </p>
                                            </div>
                                        </div>
                                    })
                                    .collect_view()}
                            </div>

                            <h2 class="text-2xl font-bold">"Ваши курсы"</h2>
                            {courses_empty.then(|| view! {
                                <p class="opacity-60">
                                    "Вы пока не записаны ни на один курс"
                                </p>
                            })}
                            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                                {courses
                                    .into_iter()
                                    .map(|course: Course| {
                                        let id = course.id;
                                        let genre_label = course
                                            .genre
                                            .as_ref()
                                            .map(|g| g.name.clone())
                                            .unwrap_or_else(|| "Без жанра".to_string());
                                        let enrolled = course
                                            .enrolled_since()
                                            .map(|date| format!("Дата записи: {}", date.short()));
                                        view! {
                                            <div
                                                class="card bg-base-100 shadow cursor-pointer hover:shadow-lg transition-shadow"
                                                on:click=move |_| {
                                                    router.navigate(AppRoute::CourseDetails { id })
                                                }
                                            >
                                                <div class="card-body py-4">
                                                    <h3 class="font-semibold">{course.title}</h3>
                                                    <p class="text-sm">
                                                        "Преподаватель: "
                                                        {course.instructor.full_name}
                                                    </p>
                                                    <p class="text-sm">"Жанр: " {genre_label}</p>
                                                    {enrolled.map(|label| view! {
                                                        <p class="text-sm opacity-70">{label}</p>
                                                    })}
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
        </div>
    }
}
