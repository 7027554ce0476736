//! 会话模块
//!
//! 管理登录会话，与路由系统解耦：
//! 路由服务通过注入的认证信号来检查认证状态。
//!
//! 会话有唯一的写入口（登录、注册、登出三个函数），其余代码
//! 只通过信号读取。凭据在 LocalStorage 持久化，刷新后恢复。

use learn164_shared::{
    AuthResponse, Role, STORAGE_ROLE_KEY, STORAGE_TOKEN_KEY, STORAGE_USERNAME_KEY,
    STORAGE_USER_ID_KEY, SignInBody, SignUpBody,
};
use leptos::prelude::*;

use crate::api::{ApiError, LearnApi};
use crate::web::LocalStorage;

/// 登录会话，四个字段与登录响应和持久化键一一对应
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub role: Role,
    pub username: String,
}

/// 会话状态
#[derive(Clone, Default, PartialEq)]
pub struct SessionState {
    /// 当前会话（仅在登录后存在）
    pub session: Option<Session>,
}

impl SessionState {
    /// 授权判定：是否已登录
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// 授权判定：是否教师
    ///
    /// 教学操作（建学科、建课程、出题、看汇总成绩）只对教师展示。
    /// 服务端仍然是最终裁判，这里只管界面显隐。
    pub fn is_instructor(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.role.is_instructor())
    }
}

/// 会话上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    /// 设置会话状态（写入）
    set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    /// 创建新的会话上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated())
    }

    /// 教师身份信号（控制教学操作的显隐）
    pub fn is_instructor_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_instructor())
    }

    /// Bearer 令牌信号（用于 API 客户端注入）
    pub fn token_signal(&self) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.get().session.map(|s| s.token))
    }

    /// 当前用户名信号（页眉展示）
    pub fn username_signal(&self) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.get().session.map(|s| s.username))
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 应用启动时从 LocalStorage 恢复会话
///
/// 只认非空令牌；其余字段缺失按默认值处理，角色解析不出来
/// 就当 `Unknown`，不会误判成教师。
pub fn init_session(ctx: &SessionContext) {
    let Some(token) = LocalStorage::get(STORAGE_TOKEN_KEY) else {
        return;
    };
    if token.is_empty() {
        return;
    }

    let user_id = LocalStorage::get(STORAGE_USER_ID_KEY)
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();
    let role = LocalStorage::get(STORAGE_ROLE_KEY)
        .map(|v| Role::parse(&v))
        .unwrap_or_default();
    let username = LocalStorage::get(STORAGE_USERNAME_KEY).unwrap_or_default();

    ctx.set_state.set(SessionState {
        session: Some(Session {
            token,
            user_id,
            role,
            username,
        }),
    });
}

/// 保存登录结果：先持久化四个键，再一次性更新信号
///
/// 信号只动一次，守卫 Effect 和页眉各自订阅，不会看到中间态。
fn store_session(ctx: &SessionContext, auth: AuthResponse) {
    LocalStorage::set(STORAGE_TOKEN_KEY, &auth.access_token);
    LocalStorage::set(STORAGE_USER_ID_KEY, &auth.user_id.to_string());
    LocalStorage::set(STORAGE_ROLE_KEY, auth.role.as_str());
    LocalStorage::set(STORAGE_USERNAME_KEY, &auth.username);

    ctx.set_state.set(SessionState {
        session: Some(Session {
            token: auth.access_token,
            user_id: auth.user_id,
            role: auth.role,
            username: auth.username,
        }),
    });
}

/// 登录
///
/// 成功后不需要手动导航，路由服务监听认证信号自动跳转首页。
pub async fn sign_in(
    ctx: &SessionContext,
    api: &LearnApi,
    email: String,
    password: String,
) -> Result<(), ApiError> {
    let auth = api.sign_in(&SignInBody { email, password }).await?;
    store_session(ctx, auth);
    Ok(())
}

/// 注册；成功即视为已登录（服务端直接返回令牌）
pub async fn sign_up(
    ctx: &SessionContext,
    api: &LearnApi,
    first_name: String,
    email: String,
    password: String,
) -> Result<(), ApiError> {
    let auth = api
        .sign_up(&SignUpBody {
            first_name,
            email,
            password,
        })
        .await?;
    store_session(ctx, auth);
    Ok(())
}

/// 登出并清除全部持久化凭据
pub fn sign_out(ctx: &SessionContext) {
    LocalStorage::delete(STORAGE_TOKEN_KEY);
    LocalStorage::delete(STORAGE_USER_ID_KEY);
    LocalStorage::delete(STORAGE_ROLE_KEY);
    LocalStorage::delete(STORAGE_USERNAME_KEY);

    ctx.set_state.set(SessionState::default());
    // 不需要手动导航，路由服务会监听认证状态变化并自动重定向
}

#[cfg(test)]
mod tests;
