use super::*;
use learn164_shared::{Genre, ServerDate, TestRef, UserRef};

fn date() -> ServerDate {
    ServerDate::parse("2024-05-07T10:00:00").unwrap()
}

fn genre(id: i64, name: &str) -> Genre {
    Genre {
        id,
        name: name.to_string(),
    }
}

fn course(
    id: i64,
    title: &str,
    instructor_id: i64,
    instructor: &str,
    genre_name: Option<&str>,
    enrolled: bool,
) -> Course {
    Course {
        id,
        title: title.to_string(),
        description: String::new(),
        instructor: Instructor {
            id: instructor_id,
            full_name: instructor.to_string(),
        },
        genre: genre_name.map(|name| genre(1, name)),
        created_at: date(),
        is_user_enrolled_in_course: enrolled,
        user_enrolled_in_course_at: enrolled.then(date),
    }
}

fn names(view: &[Genre]) -> Vec<&str> {
    view.iter().map(|g| g.name.as_str()).collect()
}

fn titles(view: &[Course]) -> Vec<&str> {
    view.iter().map(|c| c.title.as_str()).collect()
}

#[test]
fn search_keeps_exactly_the_matching_items() {
    let items = vec![
        genre(1, "Алгебра"),
        genre(2, "Геометрия"),
        genre(3, "АЛГОРИТМЫ"),
    ];
    let view = project(&items, "алг", SortOrder::Asc, |g: &Genre| g.name.as_str());
    assert_eq!(names(&view), vec!["Алгебра", "АЛГОРИТМЫ"]);

    let view = project(&items, "нет такого", SortOrder::Asc, |g: &Genre| {
        g.name.as_str()
    });
    assert!(view.is_empty());
}

#[test]
fn empty_search_keeps_everything() {
    let items = vec![genre(1, "Физика"), genre(2, "Химия")];
    let view = project(&items, "", SortOrder::Asc, |g: &Genre| g.name.as_str());
    assert_eq!(view.len(), 2);
}

#[test]
fn toggling_sort_reverses_the_view() {
    let items = vec![genre(1, "B"), genre(2, "A")];

    let order = SortOrder::default();
    let view = project(&items, "", order, |g: &Genre| g.name.as_str());
    assert_eq!(names(&view), vec!["A", "B"]);

    let view = project(&items, "", order.toggle(), |g: &Genre| g.name.as_str());
    assert_eq!(names(&view), vec!["B", "A"]);

    assert_eq!(order.toggle().toggle(), order);
}

#[test]
fn equal_keys_keep_canonical_order() {
    let items = vec![genre(1, "Алгебра"), genre(2, "алгебра"), genre(3, "Алгебра")];
    let view = project(&items, "", SortOrder::Asc, |g: &Genre| g.name.as_str());
    // 小写形式相同的先按原串比较（大写码点在前），原串也相同时保持稳定
    let ids: Vec<i64> = view.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 3, 2]);
}

#[test]
fn locale_cmp_is_case_insensitive() {
    // 小写形式相同但原串不同：全序靠原串比较兜底
    assert!(!locale_cmp("алгебра", "Алгебра").is_eq());
    assert_eq!(locale_cmp("АЛГЕБРА", "алгебра"), "АЛГЕБРА".cmp("алгебра"));
    // 原始码点序会把大写字母排到所有小写之前，这里必须不这样
    assert!(locale_cmp("Б", "а") == std::cmp::Ordering::Greater);
    assert!(locale_cmp("а", "Б") == std::cmp::Ordering::Less);
}

#[test]
fn sort_labels_match_direction() {
    assert_eq!(SortOrder::Asc.label(), "А-Я");
    assert_eq!(SortOrder::Desc.label(), "Я-А");
}

#[test]
fn course_titles_toggle_between_orders() {
    let courses = vec![
        course(1, "Б", 1, "Иванов", None, false),
        course(2, "А", 1, "Иванов", None, false),
    ];

    let view = project_courses(&courses, &CourseFilters::default());
    assert_eq!(titles(&view), vec!["А", "Б"]);

    let filters = CourseFilters {
        order: SortOrder::Desc,
        ..CourseFilters::default()
    };
    assert_eq!(titles(&project_courses(&courses, &filters)), vec!["Б", "А"]);
}

#[test]
fn enrolled_filter_runs_before_sorting() {
    let courses = vec![
        course(1, "Физика", 1, "Иванов", None, false),
        course(2, "Алгебра", 1, "Иванов", None, true),
    ];
    let filters = CourseFilters {
        enrolled_only: true,
        ..CourseFilters::default()
    };
    assert_eq!(titles(&project_courses(&courses, &filters)), vec!["Алгебра"]);
}

#[test]
fn instructor_filter_is_an_equality_filter() {
    let courses = vec![
        course(1, "Физика", 1, "Иванов", None, false),
        course(2, "Алгебра", 2, "Петров", None, false),
        course(3, "Химия", 1, "Иванов", None, false),
    ];
    let filters = CourseFilters {
        instructor: Some(1),
        ..CourseFilters::default()
    };
    assert_eq!(
        titles(&project_courses(&courses, &filters)),
        vec!["Физика", "Химия"]
    );
}

#[test]
fn grouping_overrides_title_sort() {
    let courses = vec![
        course(1, "Алгебра", 2, "Петров", Some("Математика"), false),
        course(2, "Физика", 1, "Иванов", Some("Естествознание"), false),
    ];

    // 主排序按标题：Алгебра 在前
    let plain = project_courses(&courses, &CourseFilters::default());
    assert_eq!(titles(&plain), vec!["Алгебра", "Физика"]);

    // 分组按教师：Иванов 的课排到前面
    let grouped = project_courses(
        &courses,
        &CourseFilters {
            group: GroupKey::Instructor,
            ..CourseFilters::default()
        },
    );
    assert_eq!(titles(&grouped), vec!["Физика", "Алгебра"]);

    // 分组按学科：Естествознание 在前
    let grouped = project_courses(
        &courses,
        &CourseFilters {
            group: GroupKey::Genre,
            ..CourseFilters::default()
        },
    );
    assert_eq!(titles(&grouped), vec!["Физика", "Алгебра"]);
}

#[test]
fn search_and_group_compose() {
    let courses = vec![
        course(1, "Алгебра 7 класс", 2, "Петров", None, false),
        course(2, "Алгебра 8 класс", 1, "Иванов", None, false),
        course(3, "Физика", 1, "Иванов", None, false),
    ];
    let filters = CourseFilters {
        search: "алгебра".to_string(),
        group: GroupKey::Instructor,
        ..CourseFilters::default()
    };
    assert_eq!(
        titles(&project_courses(&courses, &filters)),
        vec!["Алгебра 8 класс", "Алгебра 7 класс"]
    );
}

#[test]
fn genre_filter_follows_the_route_parameter() {
    let mut math = course(1, "Алгебра", 1, "Иванов", None, false);
    math.genre = Some(genre(3, "Математика"));
    let mut science = course(2, "Физика", 1, "Иванов", None, false);
    science.genre = Some(genre(4, "Естествознание"));
    let no_genre = course(3, "Прочее", 1, "Иванов", None, false);
    let courses = vec![math, science, no_genre];

    let filters = CourseFilters {
        genre: Some(3),
        ..CourseFilters::default()
    };
    assert_eq!(titles(&project_courses(&courses, &filters)), vec!["Алгебра"]);

    // 没有路由参数时全部可见，包括没有学科的课程
    assert_eq!(project_courses(&courses, &CourseFilters::default()).len(), 3);
}

fn result(id: i64, student: &str, test: &str, score: f64, date: &str) -> TestResult {
    TestResult {
        id,
        user: UserRef {
            id,
            full_name: student.to_string(),
        },
        test: TestRef {
            id,
            title: test.to_string(),
            course_id: 1,
        },
        score,
        created_at: ServerDate::parse(date).unwrap(),
    }
}

#[test]
fn results_sort_by_nested_student_name() {
    let results = vec![
        result(1, "Петров П.", "Тест 1", 50.0, "2024-05-07T10:00:00"),
        result(2, "Иванов И.", "Тест 2", 80.0, "2024-05-08T10:00:00"),
    ];

    let sorted = sort_results(&results, ResultColumn::Student, SortOrder::Asc);
    assert_eq!(sorted[0].user.full_name, "Иванов И.");

    let sorted = sort_results(&results, ResultColumn::Student, SortOrder::Desc);
    assert_eq!(sorted[0].user.full_name, "Петров П.");
}

#[test]
fn results_sort_by_score_and_date() {
    let results = vec![
        result(1, "Петров П.", "Тест 1", 50.0, "2024-05-07T10:00:00"),
        result(2, "Иванов И.", "Тест 2", 80.0, "2024-05-06T10:00:00"),
        result(3, "Сидоров С.", "Тест 3", 66.7, "2024-05-08T10:00:00"),
    ];

    let sorted = sort_results(&results, ResultColumn::Score, SortOrder::Desc);
    let scores: Vec<f64> = sorted.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![80.0, 66.7, 50.0]);

    let sorted = sort_results(&results, ResultColumn::Date, SortOrder::Asc);
    let ids: Vec<i64> = sorted.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);
}

#[test]
fn unique_instructors_dedup_by_id() {
    let courses = vec![
        course(1, "Физика", 1, "Иванов", None, false),
        course(2, "Алгебра", 2, "Петров", None, false),
        course(3, "Химия", 1, "Иванов", None, false),
    ];
    let instructors = unique_instructors(&courses);
    assert_eq!(instructors.len(), 2);
    assert_eq!(instructors[0].full_name, "Иванов");
    assert_eq!(instructors[1].full_name, "Петров");
}

#[test]
fn created_record_lands_in_both_lists_exactly_once() {
    let mut canonical = vec![genre(1, "Физика")];
    // 视图正被 "физ" 过滤着
    let mut view = vec![genre(1, "Физика")];

    append_created(&mut canonical, &mut view, genre(2, "Алгебра"));

    assert_eq!(canonical.iter().filter(|g| g.id == 2).count(), 1);
    // 不匹配过滤条件也要出现在视图末尾，这是有意保留的行为
    assert_eq!(view.iter().filter(|g| g.id == 2).count(), 1);
    assert_eq!(view.last().unwrap().id, 2);
}

#[test]
fn cancel_token_is_shared_across_clones() {
    let token = CancelToken::new();
    assert!(!token.is_cancelled());

    let clone = token.clone();
    clone.cancel();
    assert!(token.is_cancelled());
}
