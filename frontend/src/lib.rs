//! 学习平台前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `api`: 服务端接口客户端
//! - `listing` / `authoring` / `taking`: 页面状态核心，不碰 DOM
//! - `components`: UI 组件层

mod api;
mod auth;
mod authoring;
mod components {
    mod add_course_dialog;
    pub mod add_test;
    pub mod auth_page;
    pub mod course_details;
    pub mod courses;
    pub mod genres;
    pub mod header;
    mod icons;
    pub mod profile;
    pub mod test_page;
    pub mod test_results;
    pub mod topic_details;
}
mod listing;
mod taking;

use crate::api::LearnApi;
use crate::auth::{SessionContext, init_session};
use crate::components::add_test::AddTestPage;
use crate::components::auth_page::AuthPage;
use crate::components::course_details::CourseDetailsPage;
use crate::components::courses::CoursesPage;
use crate::components::genres::GenresPage;
use crate::components::header::Header;
use crate::components::profile::ProfilePage;
use crate::components::test_page::TakeTestPage;
use crate::components::test_results::TopicResultsPage;
use crate::components::topic_details::TopicDetailsPage;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::{HttpClient, HttpError};
    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Genres => view! { <GenresPage /> }.into_any(),
        AppRoute::Courses { genre_id } => view! { <CoursesPage genre_id=genre_id /> }.into_any(),
        AppRoute::CourseDetails { id } => view! { <CourseDetailsPage id=id /> }.into_any(),
        AppRoute::TopicDetails { course_id, id } => {
            view! { <TopicDetailsPage course_id=course_id topic_id=id /> }.into_any()
        }
        AppRoute::TopicResults { topic_id } => {
            view! { <TopicResultsPage topic_id=topic_id /> }.into_any()
        }
        AppRoute::TestPage { test_id } => view! { <TakeTestPage test_id=test_id /> }.into_any(),
        AppRoute::AddTest { topic_id, course_id } => {
            view! { <AddTestPage topic_id=topic_id course_id=course_id /> }.into_any()
        }
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Auth => view! { <AuthPage /> }.into_any(),
        // 守卫会立即重定向，这个分支不会真正展示
        AppRoute::NotFound => view! { <></> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文
    let session = SessionContext::new();
    provide_context(session);

    // 2. 从 LocalStorage 恢复上次的会话
    init_session(&session);

    // 3. API 客户端与会话共享同一个令牌信号，登录登出后无需重建
    let api = LearnApi::new(session.token_signal());
    provide_context(api);

    // 4. 认证状态信号，注入路由服务实现守卫（解耦！）
    let is_authenticated = session.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen bg-base-200">
                <Show when=move || is_authenticated.get()>
                    <Header />
                </Show>
                <RouterOutlet matcher=route_matcher />
            </div>
        </Router>
    }
}
