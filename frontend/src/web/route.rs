//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、路径解析与认证重定向规则。

use std::fmt::Display;

/// 应用路由枚举
///
/// 除 `Auth` 外所有页面都要求已登录。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页：学科（жанр）列表
    #[default]
    Genres,
    /// 课程列表，可带学科筛选
    Courses { genre_id: Option<i64> },
    /// 课程详情
    CourseDetails { id: i64 },
    /// 课程内的主题详情
    TopicDetails { course_id: i64, id: i64 },
    /// 主题成绩汇总（教师页面）
    TopicResults { topic_id: i64 },
    /// 答题页面
    TestPage { test_id: i64 },
    /// 出题页面；`course_id` 用于保存后返回所属主题
    AddTest {
        topic_id: i64,
        course_id: Option<i64>,
    },
    /// 个人资料与成绩
    Profile,
    /// 登录 / 注册页面
    Auth,
    /// 页面未找到（守卫会立即重定向，不会停留）
    NotFound,
}

/// 从查询串中取参数值（不做解码，本应用的参数都是数字）
fn query_param(query: &str, key: &str) -> Option<i64> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .and_then(|(_, v)| v.parse().ok())
}

impl AppRoute {
    /// 将 URL path（可含查询串）解析为路由枚举
    pub fn from_path(path_and_query: &str) -> Self {
        let (path, query) = match path_and_query.split_once('?') {
            Some((path, query)) => (path, query),
            None => (path_and_query, ""),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Genres,
            ["auth"] => Self::Auth,
            ["profile"] => Self::Profile,
            ["courses"] => Self::Courses {
                genre_id: query_param(query, "genreId"),
            },
            ["courses", id] => match id.parse() {
                Ok(id) => Self::CourseDetails { id },
                Err(_) => Self::NotFound,
            },
            ["courses", course_id, "topics", id] => match (course_id.parse(), id.parse()) {
                (Ok(course_id), Ok(id)) => Self::TopicDetails { course_id, id },
                _ => Self::NotFound,
            },
            ["topics", topic_id, "result"] => match topic_id.parse() {
                Ok(topic_id) => Self::TopicResults { topic_id },
                Err(_) => Self::NotFound,
            },
            ["topics", topic_id, "add-test"] => match topic_id.parse() {
                Ok(topic_id) => Self::AddTest {
                    topic_id,
                    course_id: query_param(query, "courseId"),
                },
                Err(_) => Self::NotFound,
            },
            ["tests", test_id] => match test_id.parse() {
                Ok(test_id) => Self::TestPage { test_id },
                Err(_) => Self::NotFound,
            },
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Genres | Self::NotFound => "/".to_string(),
            Self::Courses { genre_id: None } => "/courses".to_string(),
            Self::Courses {
                genre_id: Some(genre_id),
            } => format!("/courses?genreId={genre_id}"),
            Self::CourseDetails { id } => format!("/courses/{id}"),
            Self::TopicDetails { course_id, id } => format!("/courses/{course_id}/topics/{id}"),
            Self::TopicResults { topic_id } => format!("/topics/{topic_id}/result"),
            Self::TestPage { test_id } => format!("/tests/{test_id}"),
            Self::AddTest {
                topic_id,
                course_id: None,
            } => format!("/topics/{topic_id}/add-test"),
            Self::AddTest {
                topic_id,
                course_id: Some(course_id),
            } => format!("/topics/{topic_id}/add-test?courseId={course_id}"),
            Self::Profile => "/profile".to_string(),
            Self::Auth => "/auth".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Auth | Self::NotFound)
    }

    /// 按当前认证状态计算重定向目标
    ///
    /// - 未登录访问受保护页面 -> 登录页
    /// - 已登录访问登录页 -> 首页
    /// - 未匹配路径 -> 首页（未登录则登录页）
    ///
    /// 返回 `None` 表示允许停留。
    pub fn redirect_for(&self, is_authenticated: bool) -> Option<AppRoute> {
        match self {
            Self::NotFound => Some(if is_authenticated {
                Self::Genres
            } else {
                Self::Auth
            }),
            Self::Auth if is_authenticated => Some(Self::Genres),
            route if route.requires_auth() && !is_authenticated => Some(Self::Auth),
            _ => None,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests;
