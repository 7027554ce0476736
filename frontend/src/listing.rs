//! 列表页状态核心
//!
//! 所有数据页共用同一套「拉取 -> 规范列表 -> 投影视图」模式：
//! 规范列表是最近一次成功拉取的原始结果，视图列表是搜索、
//! 排序、分组控件作用后的派生结果。派生永远是对规范列表的
//! 纯投影，规范列表只在拉取成功和创建追加两处变化。
//!
//! 本模块不碰 DOM，全部逻辑可在原生目标上直接测试。

use std::cmp::Ordering;

use learn164_shared::{Course, Instructor, TestResult};
use leptos::prelude::*;

/// 页面数据的三个互斥阶段
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// 请求在途，界面显示加载指示
    Loading,
    /// 拉取失败，带本地化的提示文案；不自动重试
    Failed(String),
    /// 拉取成功，持有规范数据
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// 排序按钮文案
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Asc => "А-Я",
            SortOrder::Desc => "Я-А",
        }
    }
}

/// 不区分大小写的字典序比较
///
/// 逐字符小写后按码点比较，俄文拉丁文都适用；小写形式相同时
/// 回退到原串比较，保证全序（排序库要求）。
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

/// 统一投影：大小写不敏感的子串过滤，然后按键稳定排序
///
/// 排序必须稳定，键相同的条目保持规范列表中的相对顺序。
pub fn project<T: Clone>(
    items: &[T],
    search: &str,
    order: SortOrder,
    key: impl Fn(&T) -> &str,
) -> Vec<T> {
    let needle = search.to_lowercase();
    let mut view: Vec<T> = items
        .iter()
        .filter(|item| needle.is_empty() || key(item).to_lowercase().contains(&needle))
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        let ord = locale_cmp(key(a), key(b));
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    view
}

/// 课程分组键；激活时覆盖主排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupKey {
    #[default]
    None,
    Instructor,
    Genre,
}

/// 课程页的全部筛选控件状态
///
/// `genre` 来自路由查询参数（从首页点学科进来），其余来自
/// 页面上的控件。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilters {
    pub search: String,
    pub order: SortOrder,
    pub group: GroupKey,
    pub enrolled_only: bool,
    pub instructor: Option<i64>,
    pub genre: Option<i64>,
}

fn genre_name(course: &Course) -> &str {
    course.genre.as_ref().map(|g| g.name.as_str()).unwrap_or("")
}

/// 课程页投影
///
/// 顺序固定：先做报名与教师等值过滤，再按标题走统一投影，
/// 最后分组键激活时按分组字段整体重排（稳定排序，组内保持
/// 标题顺序）。
pub fn project_courses(courses: &[Course], filters: &CourseFilters) -> Vec<Course> {
    let filtered: Vec<Course> = courses
        .iter()
        .filter(|c| !filters.enrolled_only || c.is_user_enrolled_in_course)
        .filter(|c| filters.instructor.is_none_or(|id| c.instructor.id == id))
        .filter(|c| {
            filters
                .genre
                .is_none_or(|id| c.genre.as_ref().is_some_and(|g| g.id == id))
        })
        .cloned()
        .collect();

    let mut view = project(&filtered, &filters.search, filters.order, |c: &Course| {
        c.title.as_str()
    });

    match filters.group {
        GroupKey::None => {}
        GroupKey::Instructor => {
            view.sort_by(|a, b| locale_cmp(&a.instructor.full_name, &b.instructor.full_name));
        }
        GroupKey::Genre => {
            view.sort_by(|a, b| locale_cmp(genre_name(a), genre_name(b)));
        }
    }
    view
}

/// 课程列表里出现过的教师去重（保序），填充筛选下拉框
pub fn unique_instructors(courses: &[Course]) -> Vec<Instructor> {
    let mut seen: Vec<i64> = Vec::new();
    let mut out = Vec::new();
    for course in courses {
        if !seen.contains(&course.instructor.id) {
            seen.push(course.instructor.id);
            out.push(course.instructor.clone());
        }
    }
    out
}

/// 创建成功后把返回记录同时追加到规范列表与当前视图
///
/// 不做重新投影：新记录即使不满足当前搜索条件也会出现在
/// 视图末尾，等用户下次触碰任何控件才被投影规则收编。
pub fn append_created<T: Clone>(canonical: &mut Vec<T>, view: &mut Vec<T>, item: T) {
    canonical.push(item.clone());
    view.push(item);
}

/// 成绩表的可排序列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultColumn {
    Student,
    Test,
    Score,
    Date,
}

/// 成绩表投影：按所选列稳定排序
///
/// 学生与测验是嵌套字段，按名称做本地化比较；分数与日期按值。
pub fn sort_results(
    results: &[TestResult],
    column: ResultColumn,
    order: SortOrder,
) -> Vec<TestResult> {
    let mut view = results.to_vec();
    view.sort_by(|a, b| {
        let ord = match column {
            ResultColumn::Student => locale_cmp(&a.user.full_name, &b.user.full_name),
            ResultColumn::Test => locale_cmp(&a.test.title, &b.test.title),
            ResultColumn::Score => a.score.total_cmp(&b.score),
            ResultColumn::Date => a.created_at.cmp(&b.created_at),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    view
}

/// 取消令牌，绑定页面挂载生命周期
///
/// 导航离开不终止在途请求；请求完成时检查令牌，已取消就丢弃
/// 结果，不再写已卸载页面的信号。信号随页面所有者一起销毁，
/// 销毁后的读取同样按已取消处理。
#[derive(Clone, Copy)]
pub struct CancelToken {
    cancelled: RwSignal<bool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            cancelled: RwSignal::new(false),
        }
    }

    pub fn cancel(&self) {
        let _ = self.cancelled.try_set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.try_get_untracked().unwrap_or(true)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// 创建与当前组件生命周期绑定的取消令牌
pub fn use_screen_token() -> CancelToken {
    let token = CancelToken::new();
    on_cleanup(move || token.cancel());
    token
}

#[cfg(test)]
mod tests;
