use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiError, use_api};
use crate::auth::{sign_in, sign_up, use_session};
use crate::components::icons::GraduationCap;

/// 登录 / 注册页面，一个表单两种模式切换
///
/// 成功后不做手动跳转：会话信号翻转，路由守卫自动送去首页。
#[component]
pub fn AuthPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();

    let (is_login, set_is_login) = signal(true);
    let (first_name, set_first_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let result = if is_login.get_untracked() {
                sign_in(
                    &session,
                    &api,
                    email.get_untracked(),
                    password.get_untracked(),
                )
                .await
            } else {
                sign_up(
                    &session,
                    &api,
                    first_name.get_untracked(),
                    email.get_untracked(),
                    password.get_untracked(),
                )
                .await
            };
            set_is_submitting.set(false);

            if let Err(e) = result {
                // 服务端给的文案直接展示，其余错误统一兜底
                let message = match e {
                    ApiError::Server { message, .. } => message,
                    _ => "Произошла ошибка".to_string(),
                };
                set_error_msg.set(Some(message));
            }
        });
    };

    let toggle_mode = move |_| {
        set_error_msg.set(None);
        set_is_login.update(|v| *v = !*v);
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <GraduationCap attr:class="h-10 w-10" />
                        </div>
                        <h1 class="text-3xl font-bold">"МБОУ СОШ №164"</h1>
                        <p class="text-base-content/70">
                            {move || if is_login.get() { "Вход в систему" } else { "Регистрация" }}
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <Show when=move || !is_login.get()>
                            <div class="form-control">
                                <label class="label" for="first_name">
                                    <span class="label-text">"Имя"</span>
                                </label>
                                <input
                                    id="first_name"
                                    type="text"
                                    placeholder="Иван"
                                    on:input=move |ev| set_first_name.set(event_target_value(&ev))
                                    prop:value=first_name
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="user@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Пароль"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Подождите..." }.into_any()
                                } else if is_login.get() {
                                    "Войти".into_any()
                                } else {
                                    "Зарегистрироваться".into_any()
                                }}
                            </button>
                        </div>
                        <button
                            type="button"
                            class="btn btn-link btn-sm no-underline"
                            on:click=toggle_mode
                        >
                            {move || if is_login.get() {
                                "Нет аккаунта? Зарегистрируйтесь"
                            } else {
                                "Уже есть аккаунт? Войдите"
                            }}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
