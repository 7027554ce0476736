//! API 协议定义
//!
//! 每个后端能力对应一个请求类型，通过 `ApiRequest` trait 绑定
//! 方法、路径、查询参数、请求体与响应类型。HTTP 客户端只依赖
//! 这个 trait，新增接口不需要改客户端代码。

use crate::{
    AuthResponse, Course, Genre, Lesson, NewCourse, NewLesson, NewQuestion, NewTopic, Question,
    SignInBody, SignUpBody, SubmitTestBody, TestResult, TestSummary, Topic, User,
};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

/// HTTP 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 描述一次 API 调用的全部静态信息
pub trait ApiRequest {
    /// 请求体类型；无请求体的接口用 `()`
    type Body: Serialize;
    /// 响应类型；调用方不关心响应内容时用 `IgnoredAny`
    type Response: DeserializeOwned;
    /// HTTP 方法
    const METHOD: HttpMethod;

    /// URL 路径（不含查询串）
    fn path(&self) -> String;

    /// 查询参数键值对（未编码）
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// 请求体
    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

// =========================================================
// 认证 (Security)
// =========================================================

impl ApiRequest for SignInBody {
    type Body = Self;
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/users/security/sign-in".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

impl ApiRequest for SignUpBody {
    type Body = Self;
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/users/security/sign-up".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

/// 当前登录用户
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Body = ();
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/users/me".to_string()
    }
}

// =========================================================
// 课程目录 (Catalog)
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListGenresRequest;

impl ApiRequest for ListGenresRequest {
    type Body = ();
    type Response = Vec<Genre>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/courses/genres".to_string()
    }
}

/// 创建学科。请求体是裸 JSON 字符串（原接口如此），不是对象。
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGenreRequest {
    pub name: String,
}

impl ApiRequest for CreateGenreRequest {
    type Body = String;
    type Response = Genre;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/courses/genres".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.name)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListCoursesRequest;

impl ApiRequest for ListCoursesRequest {
    type Body = ();
    type Response = Vec<Course>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/courses".to_string()
    }
}

impl ApiRequest for NewCourse {
    type Body = Self;
    type Response = Course;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/courses".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetCourseRequest {
    pub id: i64,
}

impl ApiRequest for GetCourseRequest {
    type Body = ();
    type Response = Course;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/courses/{}", self.id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListTopicsRequest {
    pub course_id: i64,
}

impl ApiRequest for ListTopicsRequest {
    type Body = ();
    type Response = Vec<Topic>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/courses/topics".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("courseId", self.course_id.to_string())]
    }
}

impl ApiRequest for NewTopic {
    type Body = Self;
    type Response = Topic;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/courses/topics".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

// =========================================================
// 报名 (Enrollments)
// =========================================================

/// 报名课程。无请求体，课程号走查询参数。
#[derive(Debug, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub course_id: i64,
}

impl ApiRequest for EnrollRequest {
    type Body = ();
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/courses/enroll".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("courseId", self.course_id.to_string())]
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListEnrollmentsRequest;

impl ApiRequest for ListEnrollmentsRequest {
    type Body = ();
    type Response = Vec<Course>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/courses/enrollments".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckEnrollmentRequest {
    pub course_id: i64,
}

impl ApiRequest for CheckEnrollmentRequest {
    type Body = ();
    type Response = bool;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/courses/enrollments/check".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("courseId", self.course_id.to_string())]
    }
}

// =========================================================
// 讲义 (Lessons)
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListLessonsRequest {
    pub topic_id: i64,
}

impl ApiRequest for ListLessonsRequest {
    type Body = ();
    type Response = Vec<Lesson>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/lessons".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("topicId", self.topic_id.to_string())]
    }
}

impl ApiRequest for NewLesson {
    type Body = Self;
    type Response = Lesson;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/lessons".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetLessonRequest {
    pub id: i64,
}

impl ApiRequest for GetLessonRequest {
    type Body = ();
    type Response = Lesson;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/lessons/{}", self.id)
    }
}

// =========================================================
// 测验 (Tests)
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListTestsRequest {
    pub topic_id: i64,
}

impl ApiRequest for ListTestsRequest {
    type Body = ();
    type Response = Vec<TestSummary>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/tests".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("topicId", self.topic_id.to_string())]
    }
}

/// 创建测验：题目数组作请求体，标题与主题号走查询参数。
/// 原客户端另有一处用 `{topicId, title, body}` 对象提交的死代码，
/// 本协议只保留出题页实际使用、服务端接受的这一种形状。
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTestRequest {
    pub topic_id: i64,
    pub title: String,
    pub questions: Vec<NewQuestion>,
}

impl ApiRequest for CreateTestRequest {
    type Body = Vec<NewQuestion>;
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/tests".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("topicId", self.topic_id.to_string()),
            ("title", self.title.clone()),
        ]
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.questions)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TestQuestionsRequest {
    pub test_id: i64,
}

impl ApiRequest for TestQuestionsRequest {
    type Body = ();
    type Response = Vec<Question>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/tests/{}/questions", self.test_id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitTestRequest {
    pub test_id: i64,
    pub answers: SubmitTestBody,
}

impl ApiRequest for SubmitTestRequest {
    type Body = SubmitTestBody;
    type Response = TestResult;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/tests/{}/submit", self.test_id)
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.answers)
    }
}

// =========================================================
// 成绩 (Progress)
// =========================================================

/// 当前用户的全部测验成绩
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResultsRequest;

impl ApiRequest for ListResultsRequest {
    type Body = ();
    type Response = Vec<TestResult>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/progress/test-results".to_string()
    }
}

/// 某主题下所有学生的成绩（教师用）
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsByTopicRequest {
    pub topic_id: i64,
}

impl ApiRequest for ResultsByTopicRequest {
    type Body = ();
    type Response = Vec<TestResult>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/progress/test-results/topic".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("topicId", self.topic_id.to_string())]
    }
}

/// 当前用户在某个测验上的成绩；没有成绩时服务端返回错误
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultByTestRequest {
    pub test_id: i64,
}

impl ApiRequest for ResultByTestRequest {
    type Body = ();
    type Response = TestResult;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/progress/test-results/by-test-id/{}", self.test_id)
    }
}
