use super::*;

#[test]
fn parses_every_screen_path() {
    assert_eq!(AppRoute::from_path("/"), AppRoute::Genres);
    assert_eq!(AppRoute::from_path("/auth"), AppRoute::Auth);
    assert_eq!(AppRoute::from_path("/profile"), AppRoute::Profile);
    assert_eq!(
        AppRoute::from_path("/courses"),
        AppRoute::Courses { genre_id: None }
    );
    assert_eq!(
        AppRoute::from_path("/courses/5"),
        AppRoute::CourseDetails { id: 5 }
    );
    assert_eq!(
        AppRoute::from_path("/courses/5/topics/12"),
        AppRoute::TopicDetails { course_id: 5, id: 12 }
    );
    assert_eq!(
        AppRoute::from_path("/topics/12/result"),
        AppRoute::TopicResults { topic_id: 12 }
    );
    assert_eq!(
        AppRoute::from_path("/tests/9"),
        AppRoute::TestPage { test_id: 9 }
    );
}

#[test]
fn parses_query_parameters() {
    assert_eq!(
        AppRoute::from_path("/courses?genreId=3"),
        AppRoute::Courses { genre_id: Some(3) }
    );
    assert_eq!(
        AppRoute::from_path("/topics/12/add-test?courseId=5"),
        AppRoute::AddTest {
            topic_id: 12,
            course_id: Some(5),
        }
    );
    assert_eq!(
        AppRoute::from_path("/topics/12/add-test"),
        AppRoute::AddTest {
            topic_id: 12,
            course_id: None,
        }
    );
    // 无关参数不影响解析
    assert_eq!(
        AppRoute::from_path("/courses?foo=bar"),
        AppRoute::Courses { genre_id: None }
    );
}

#[test]
fn garbage_paths_fall_through_to_not_found() {
    assert_eq!(AppRoute::from_path("/unknown"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/courses/abc"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/courses/5/extra"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/topics/9"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/tests/9/и-ещё"), AppRoute::NotFound);
}

#[test]
fn path_round_trips_through_parser() {
    let routes = [
        AppRoute::Genres,
        AppRoute::Courses { genre_id: None },
        AppRoute::Courses { genre_id: Some(3) },
        AppRoute::CourseDetails { id: 5 },
        AppRoute::TopicDetails { course_id: 5, id: 12 },
        AppRoute::TopicResults { topic_id: 12 },
        AppRoute::TestPage { test_id: 9 },
        AppRoute::AddTest {
            topic_id: 12,
            course_id: Some(5),
        },
        AppRoute::Profile,
        AppRoute::Auth,
    ];
    for route in routes {
        assert_eq!(AppRoute::from_path(&route.to_path()), route);
    }
}

#[test]
fn every_screen_except_auth_requires_session() {
    assert!(AppRoute::Genres.requires_auth());
    assert!(AppRoute::Courses { genre_id: None }.requires_auth());
    assert!(AppRoute::Profile.requires_auth());
    assert!(AppRoute::TestPage { test_id: 1 }.requires_auth());
    assert!(!AppRoute::Auth.requires_auth());
}

#[test]
fn guests_are_sent_to_auth() {
    assert_eq!(
        AppRoute::Genres.redirect_for(false),
        Some(AppRoute::Auth)
    );
    assert_eq!(
        AppRoute::CourseDetails { id: 5 }.redirect_for(false),
        Some(AppRoute::Auth)
    );
    assert_eq!(AppRoute::Auth.redirect_for(false), None);
}

#[test]
fn signed_in_users_cannot_reach_auth() {
    assert_eq!(AppRoute::Auth.redirect_for(true), Some(AppRoute::Genres));
    assert_eq!(AppRoute::Genres.redirect_for(true), None);
    assert_eq!(AppRoute::Profile.redirect_for(true), None);
}

#[test]
fn unmatched_paths_redirect_by_session() {
    assert_eq!(
        AppRoute::NotFound.redirect_for(true),
        Some(AppRoute::Genres)
    );
    assert_eq!(
        AppRoute::NotFound.redirect_for(false),
        Some(AppRoute::Auth)
    );
}
