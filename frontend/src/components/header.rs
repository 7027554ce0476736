use leptos::prelude::*;

use crate::auth::{sign_out, use_session};
use crate::components::icons::{GraduationCap, LogOut, User};
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

/// 页眉，登录后在所有页面顶部显示
///
/// 用户名直接读会话信号，登录与注册后立刻生效，不需要再拉一次
/// 用户接口。登出由守卫 Effect 负责跳转，这里只清会话。
#[component]
pub fn Header() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let username = session.username_signal();
    let on_logout = move |_| sign_out(&session);

    view! {
        <div class="navbar bg-primary text-primary-content shadow-lg">
            <div class="flex-1">
                <a
                    class="btn btn-ghost text-xl gap-2"
                    on:click={
                        let navigate = navigate.clone();
                        move |_| navigate(AppRoute::Genres)
                    }
                >
                    <GraduationCap attr:class="h-7 w-7" />
                    "МБОУ СОШ №164"
                </a>
            </div>
            <div class="flex-none gap-2">
                <span class="hidden md:inline">
                    {move || username.get().unwrap_or_default()}
                </span>
                <div class="dropdown dropdown-end">
                    <div tabindex="0" role="button" class="btn btn-ghost btn-circle">
                        <User attr:class="h-5 w-5" />
                    </div>
                    <ul
                        tabindex="0"
                        class="dropdown-content z-[1] menu p-2 shadow bg-base-100 text-base-content rounded-box w-44"
                    >
                        <li>
                            <a on:click={
                                let navigate = navigate.clone();
                                move |_| navigate(AppRoute::Profile)
                            }>"Профиль"</a>
                        </li>
                        <li>
                            <a on:click=on_logout class="text-error">
                                <LogOut attr:class="h-4 w-4" />
                                "Выйти"
                            </a>
                        </li>
                    </ul>
                </div>
            </div>
        </div>
    }
}
