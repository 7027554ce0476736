//! API 客户端模块
//!
//! 基于共享协议层的 `ApiRequest` 实现统一发送逻辑：
//! 方法、路径、查询参数、请求体都由请求类型描述，
//! 这里只负责拼 URL、挂认证头、序列化与反序列化。

use learn164_shared::protocol::{
    ApiRequest, CheckEnrollmentRequest, CreateGenreRequest, CreateTestRequest, CurrentUserRequest,
    EnrollRequest, GetCourseRequest, GetLessonRequest, ListCoursesRequest, ListEnrollmentsRequest,
    ListGenresRequest, ListLessonsRequest, ListResultsRequest, ListTestsRequest,
    ListTopicsRequest, ResultByTestRequest, ResultsByTopicRequest, SubmitTestRequest,
    TestQuestionsRequest,
};
use learn164_shared::{
    AuthResponse, Course, DEFAULT_API_BASE, Genre, Lesson, NewCourse, NewLesson, NewTopic,
    Question, SignInBody, SignUpBody, SubmitTestBody, TestResult, TestSummary, Topic, User,
};
use leptos::prelude::*;
use serde::Deserialize;

use crate::web::{HttpClient, HttpError};

/// API 调用错误
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 网络层失败，没有收到响应
    Network(String),
    /// 服务端返回了错误状态
    Server { status: u16, message: String },
    /// 请求体序列化失败
    Encode(String),
    /// 响应体反序列化失败
    Decode(String),
}

// 错误文案直接进提示框，所以是俄文（面向用户）
impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "сетевая ошибка: {}", msg),
            ApiError::Server { status, message } => {
                write!(f, "ошибка сервера ({}): {}", status, message)
            }
            ApiError::Encode(msg) => write!(f, "не удалось собрать запрос: {}", msg),
            ApiError::Decode(msg) => write!(f, "не удалось разобрать ответ: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::RequestBuildFailed(msg) | HttpError::NetworkError(msg) => {
                ApiError::Network(msg)
            }
            HttpError::ResponseParseFailed(msg) => ApiError::Decode(msg),
        }
    }
}

/// 服务端错误体约定形状 `{"message": "..."}`
#[derive(Deserialize)]
struct ServerMessage {
    message: String,
}

/// 从错误响应体里提取人话；解析不出来就原样带回
fn server_message(status: u16, text: &str) -> String {
    serde_json_wasm::from_str::<ServerMessage>(text)
        .map(|m| m.message)
        .unwrap_or_else(|_| {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                format!("HTTP {status}")
            } else {
                trimmed.to_string()
            }
        })
}

/// API 客户端
///
/// 持有注入的令牌信号，登录登出后无需重建客户端。
/// `Copy` 语义允许直接塞进任意闭包。
#[derive(Clone, Copy)]
pub struct LearnApi {
    base_url: &'static str,
    token: Signal<Option<String>>,
}

impl LearnApi {
    pub fn new(token: Signal<Option<String>>) -> Self {
        Self {
            base_url: DEFAULT_API_BASE,
            token,
        }
    }

    /// 拼接完整 URL，查询参数逐个做 URI 编码（标题里有空格和西里尔字母）
    fn url<R: ApiRequest>(&self, request: &R) -> String {
        let mut url = format!("{}{}", self.base_url, request.path());
        let mut separator = '?';
        for (key, value) in request.query() {
            let encoded: String = js_sys::encode_uri_component(&value).into();
            url.push(separator);
            url.push_str(key);
            url.push('=');
            url.push_str(&encoded);
            separator = '&';
        }
        url
    }

    /// 统一发送入口
    ///
    /// 空响应体按 `null` 解码，容忍创建、报名这类无返回内容的接口。
    async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let url = self.url(request);
        let mut builder =
            HttpClient::request(R::METHOD, &url).header("Content-Type", "application/json");

        if let Some(token) = self.token.get_untracked() {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        if let Some(body) = request.body() {
            let json =
                serde_json_wasm::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
            builder = builder.body(json);
        }

        let response = builder.send().await?;
        let status = response.status();
        let ok = response.ok();
        let text = response.text().await?;

        if !ok {
            return Err(ApiError::Server {
                status,
                message: server_message(status, &text),
            });
        }

        if text.trim().is_empty() {
            serde_json_wasm::from_str("null").map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            serde_json_wasm::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
        }
    }

    // =====================================================
    // 认证与用户
    // =====================================================

    pub async fn sign_in(&self, body: &SignInBody) -> Result<AuthResponse, ApiError> {
        self.send(body).await
    }

    pub async fn sign_up(&self, body: &SignUpBody) -> Result<AuthResponse, ApiError> {
        self.send(body).await
    }

    /// 获取当前登录用户的资料
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.send(&CurrentUserRequest).await
    }

    // =====================================================
    // 学科与课程
    // =====================================================

    pub async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        self.send(&ListGenresRequest).await
    }

    pub async fn create_genre(&self, name: String) -> Result<Genre, ApiError> {
        self.send(&CreateGenreRequest { name }).await
    }

    pub async fn courses(&self) -> Result<Vec<Course>, ApiError> {
        self.send(&ListCoursesRequest).await
    }

    pub async fn create_course(&self, course: &NewCourse) -> Result<Course, ApiError> {
        self.send(course).await
    }

    pub async fn course(&self, id: i64) -> Result<Course, ApiError> {
        self.send(&GetCourseRequest { id }).await
    }

    pub async fn topics(&self, course_id: i64) -> Result<Vec<Topic>, ApiError> {
        self.send(&ListTopicsRequest { course_id }).await
    }

    pub async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, ApiError> {
        self.send(topic).await
    }

    // =====================================================
    // 报名
    // =====================================================

    /// 报名课程；响应内容服务端未约定，丢弃
    pub async fn enroll(&self, course_id: i64) -> Result<(), ApiError> {
        self.send(&EnrollRequest { course_id }).await?;
        Ok(())
    }

    pub async fn enrollments(&self) -> Result<Vec<Course>, ApiError> {
        self.send(&ListEnrollmentsRequest).await
    }

    // 接口存在但界面直接读课程上的报名字段
    #[allow(dead_code)]
    pub async fn check_enrollment(&self, course_id: i64) -> Result<bool, ApiError> {
        self.send(&CheckEnrollmentRequest { course_id }).await
    }

    // =====================================================
    // 讲义
    // =====================================================

    pub async fn lessons(&self, topic_id: i64) -> Result<Vec<Lesson>, ApiError> {
        self.send(&ListLessonsRequest { topic_id }).await
    }

    pub async fn create_lesson(&self, lesson: &NewLesson) -> Result<Lesson, ApiError> {
        self.send(lesson).await
    }

    // 接口存在但列表数据已含全部字段，详情页未做
    #[allow(dead_code)]
    pub async fn lesson(&self, id: i64) -> Result<Lesson, ApiError> {
        self.send(&GetLessonRequest { id }).await
    }

    // =====================================================
    // 测验与成绩
    // =====================================================

    pub async fn tests(&self, topic_id: i64) -> Result<Vec<TestSummary>, ApiError> {
        self.send(&ListTestsRequest { topic_id }).await
    }

    /// 创建测验；服务端响应形状未约定，丢弃
    pub async fn create_test(&self, request: &CreateTestRequest) -> Result<(), ApiError> {
        self.send(request).await?;
        Ok(())
    }

    pub async fn test_questions(&self, test_id: i64) -> Result<Vec<Question>, ApiError> {
        self.send(&TestQuestionsRequest { test_id }).await
    }

    pub async fn submit_test(
        &self,
        test_id: i64,
        answers: SubmitTestBody,
    ) -> Result<TestResult, ApiError> {
        self.send(&SubmitTestRequest { test_id, answers }).await
    }

    pub async fn all_results(&self) -> Result<Vec<TestResult>, ApiError> {
        self.send(&ListResultsRequest).await
    }

    pub async fn results_by_topic(&self, topic_id: i64) -> Result<Vec<TestResult>, ApiError> {
        self.send(&ResultsByTopicRequest { topic_id }).await
    }

    /// 查当前用户在某测验上的成绩；没有成绩时服务端给错误状态
    pub async fn result_by_test(&self, test_id: i64) -> Result<TestResult, ApiError> {
        self.send(&ResultByTestRequest { test_id }).await
    }
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> LearnApi {
    use_context::<LearnApi>().expect("LearnApi should be provided")
}
