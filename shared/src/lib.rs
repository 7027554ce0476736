use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;

pub use date::ServerDate;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 后端服务地址
pub const DEFAULT_API_BASE: &str = "https://spotdiff.ru/learn-164-api";

// LocalStorage 会话键名，与后端签发的字段一一对应
pub const STORAGE_TOKEN_KEY: &str = "token";
pub const STORAGE_USER_ID_KEY: &str = "userId";
pub const STORAGE_ROLE_KEY: &str = "role";
pub const STORAGE_USERNAME_KEY: &str = "username";

// =========================================================
// 用户与会话 (Users & Session)
// =========================================================

/// 用户角色
///
/// 服务端可能扩展新角色，未知值统一归为 `Unknown`，
/// 权限上等同于学生（不显示任何教师操作）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Instructor,
    #[serde(other)]
    #[default]
    Unknown,
}

impl Role {
    pub fn is_instructor(&self) -> bool {
        matches!(self, Role::Instructor)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Instructor => "INSTRUCTOR",
            Role::Unknown => "UNKNOWN",
        }
    }

    /// 从存储的字符串恢复角色（宽松解析，未知值不报错）
    pub fn parse(value: &str) -> Self {
        match value {
            "STUDENT" => Role::Student,
            "INSTRUCTOR" => Role::Instructor,
            _ => Role::Unknown,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

/// 登录/注册成功后服务端签发的会话字段
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user_id: i64,
    pub role: Role,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpBody {
    pub first_name: String,
    pub email: String,
    pub password: String,
}

// =========================================================
// 课程目录 (Catalog)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub id: i64,
    pub full_name: String,
}

/// 课程。`genre` 可为 null（创建时允许不指定学科）。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub instructor: Instructor,
    pub genre: Option<Genre>,
    pub created_at: ServerDate,
    pub is_user_enrolled_in_course: bool,
    pub user_enrolled_in_course_at: Option<ServerDate>,
}

impl Course {
    /// 报名日期。仅当两个报名字段一致（已报名且日期存在）时返回。
    pub fn enrolled_since(&self) -> Option<&ServerDate> {
        if self.is_user_enrolled_in_course {
            self.user_enrolled_in_course_at.as_ref()
        } else {
            None
        }
    }
}

/// 创建课程请求体。`genre_id` 缺省时按原接口语义序列化为 null。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub genre_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: ServerDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTopic {
    pub title: String,
    pub description: String,
    pub course_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: i64,
    pub title: String,
    pub file_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLesson {
    pub title: String,
    pub file_url: String,
    pub topic_id: i64,
}

// =========================================================
// 测验 (Tests)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// 答题时拉取的题目（不含正确性标记）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: i64,
    pub text: String,
}

/// 出题时提交的题目（字段名与答题接口不同，以创建接口为准）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub question_text: String,
    pub answers: Vec<NewAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAnswer {
    pub answer_text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSelection {
    pub question_id: i64,
    pub answer_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestBody {
    pub answers: Vec<AnswerSelection>,
}

// =========================================================
// 成绩 (Progress)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: i64,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestRef {
    pub id: i64,
    pub title: String,
    /// 所属课程，用于测验结束后返回课程页
    pub course_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: i64,
    pub user: UserRef,
    pub test: TestRef,
    pub score: f64,
    pub created_at: ServerDate,
}

#[cfg(test)]
mod tests;
