use learn164_shared::{Course, Instructor, NewCourse};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::use_session;
use crate::components::add_course_dialog::AddCourseDialog;
use crate::components::icons::{ArrowUpDown, Search};
use crate::listing::{
    CourseFilters, GroupKey, LoadState, SortOrder, append_created, project_courses,
    unique_instructors, use_screen_token,
};
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

/// 课程列表页
///
/// 路由带学科 id 时规范列表在拉取后就按学科收窄，教师下拉框
/// 也只列出该学科下出现过的教师。其余控件（搜索、排序、分组、
/// 教师、只看已报名）都走投影，互相可叠加。
#[component]
pub fn CoursesPage(genre_id: Option<i64>) -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let navigate = use_navigate();
    let token = use_screen_token();

    let is_instructor = session.is_instructor_signal();

    let (courses, set_courses) = signal(LoadState::<Vec<Course>>::Loading);
    let (view, set_view) = signal(Vec::<Course>::new());
    let (instructors, set_instructors) = signal(Vec::<Instructor>::new());
    let (search, set_search) = signal(String::new());
    let (order, set_order) = signal(SortOrder::default());
    let (group, set_group) = signal(GroupKey::default());
    let (enrolled_only, set_enrolled_only) = signal(false);
    let (instructor_filter, set_instructor_filter) = signal(Option::<i64>::None);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    let filters = move || CourseFilters {
        search: search.get_untracked(),
        order: order.get_untracked(),
        group: group.get_untracked(),
        enrolled_only: enrolled_only.get_untracked(),
        instructor: instructor_filter.get_untracked(),
        genre: genre_id,
    };

    let reproject = move || {
        courses.with_untracked(|state| {
            if let Some(items) = state.ready() {
                set_view.set(project_courses(items, &filters()));
            }
        });
    };

    let load = move || {
        set_courses.set(LoadState::Loading);
        spawn_local(async move {
            let result = api.courses().await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(mut data) => {
                    // 路由带学科时规范列表只保留该学科的课程
                    if let Some(genre_id) = genre_id {
                        data.retain(|c| c.genre.as_ref().is_some_and(|g| g.id == genre_id));
                    }
                    set_instructors.set(unique_instructors(&data));
                    set_courses.set(LoadState::Ready(data));
                    reproject();
                }
                Err(e) => {
                    set_courses.set(LoadState::Failed(format!(
                        "Ошибка при загрузке данных: {}",
                        e
                    )));
                }
            }
        });
    };

    Effect::new(move |_| load());

    let handle_add_course = move |new_course: NewCourse| {
        spawn_local(async move {
            let result = api.create_course(&new_course).await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(course) => {
                    set_notification.set(Some(("Курс добавлен".to_string(), false)));
                    set_courses.update(|canonical| {
                        if let LoadState::Ready(items) = canonical {
                            set_view.update(|view| append_created(items, view, course));
                        }
                    });
                }
                Err(e) => {
                    set_notification
                        .set(Some((format!("Ошибка при добавлении курса: {}", e), true)));
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

            <h1 class="text-3xl font-bold text-center">"Курсы"</h1>

            <div class="flex flex-col lg:flex-row gap-2 justify-center items-center flex-wrap">
                <label class="input input-bordered flex items-center gap-2 w-full max-w-xs">
                    <Search attr:class="h-4 w-4 opacity-50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Поиск курсов..."
                        prop:value=search
                        on:input=move |ev| {
                            set_search.set(event_target_value(&ev));
                            reproject();
                        }
                    />
                </label>

                <select
                    class="select select-bordered"
                    on:change=move |ev| {
                        set_group.set(match event_target_value(&ev).as_str() {
                            "instructor" => GroupKey::Instructor,
                            "genre" => GroupKey::Genre,
                            _ => GroupKey::None,
                        });
                        reproject();
                    }
                >
                    <option value="none">"Без группировки"</option>
                    <option value="instructor">"По преподавателю"</option>
                    <option value="genre">"По жанру"</option>
                </select>

                <select
                    class="select select-bordered"
                    on:change=move |ev| {
                        set_instructor_filter.set(event_target_value(&ev).parse().ok());
                        reproject();
                    }
                >
                    <option value="">"Все преподаватели"</option>
                    <For
                        each=move || instructors.get()
                        key=|i| i.id
                        children=move |instructor: Instructor| {
                            view! {
                                <option value=instructor.id.to_string()>
                                    {instructor.full_name}
                                </option>
                            }
                        }
                    />
                </select>

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

                <label class="label cursor-pointer gap-2">
                    <input
                        type="checkbox"
                        class="checkbox checkbox-primary"
                        prop:checked=enrolled_only
                        on:change=move |ev| {
                            set_enrolled_only.set(event_target_checked(&ev));
                            reproject();
                        }
                    />
                    <span class="label-text">"Записанные"</span>
                </label>

                <Show when=move || is_instructor.get()>
                    <AddCourseDialog genre_id=genre_id on_add=handle_add_course />
                </Show>
            </div>

            {move || match courses.get() {
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
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                            <For
                                each=move || view.get()
                                key=|c| c.id
                                children=move |course: Course| {
                                    let id = course.id;
                                    let navigate = navigate.clone();
                                    let genre_label = course
                                        .genre
                                        .as_ref()
                                        .map(|g| g.name.clone())
                                        .unwrap_or_else(|| "Без жанра".to_string());
                                    let enrolled = course
                                        .enrolled_since()
                                        .map(|date| format!("Записан с {}", date.short()));
                                    view! {
                                        <div
                                            class="card bg-base-100 shadow-xl cursor-pointer hover:shadow-2xl transition-shadow"
                                            on:click=move |_| {
                                                navigate(AppRoute::CourseDetails { id })
                                            }
                                        >
                                            <div class="card-body">
                                                <h2 class="card-title">{course.title}</h2>
                                                <p class="text-sm opacity-70">{course.description}</p>
                                                <p class="text-sm">
                                                    "Преподаватель: "
                                                    {course.instructor.full_name}
                                                </p>
                                                <p class="text-sm">"Жанр: " {genre_label}</p>
                                                {enrolled.map(|label| view! {
                                                    <div class="badge badge-success badge-outline">
                                                        {label}
                                                    </div>
                                                })}
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
