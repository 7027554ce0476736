use super::*;

#[test]
fn role_round_trip() {
    assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"STUDENT\"");
    assert_eq!(
        serde_json::to_string(&Role::Instructor).unwrap(),
        "\"INSTRUCTOR\""
    );
    assert_eq!(
        serde_json::from_str::<Role>("\"INSTRUCTOR\"").unwrap(),
        Role::Instructor
    );
}

#[test]
fn unknown_role_never_grants_authoring() {
    let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
    assert_eq!(role, Role::Unknown);
    assert!(!role.is_instructor());
    assert_eq!(Role::parse("что-то"), Role::Unknown);
    assert!(Role::Instructor.is_instructor());
    assert!(!Role::Student.is_instructor());
}

#[test]
fn role_survives_storage_round_trip() {
    for role in [Role::Student, Role::Instructor, Role::Unknown] {
        assert_eq!(Role::parse(role.as_str()), role);
    }
}

#[test]
fn auth_response_decodes_server_shape() {
    let json = r#"{"accessToken":"t1","userId":7,"role":"STUDENT","username":"A"}"#;
    let auth: AuthResponse = serde_json::from_str(json).unwrap();
    assert_eq!(auth.access_token, "t1");
    assert_eq!(auth.user_id, 7);
    assert_eq!(auth.role, Role::Student);
    assert_eq!(auth.username, "A");
}

#[test]
fn course_decodes_server_shape() {
    let json = r#"{
        "id": 3,
        "title": "Алгебра",
        "description": "Курс алгебры",
        "instructor": {"id": 2, "fullName": "Иванов И.И."},
        "genre": {"id": 1, "name": "Математика"},
        "createdAt": "2024-05-07T10:00:00",
        "isUserEnrolledInCourse": true,
        "userEnrolledInCourseAt": "2024-05-09T08:30:00"
    }"#;
    let course: Course = serde_json::from_str(json).unwrap();
    assert_eq!(course.title, "Алгебра");
    assert_eq!(course.instructor.full_name, "Иванов И.И.");
    assert_eq!(course.genre.as_ref().unwrap().name, "Математика");
    assert!(course.is_user_enrolled_in_course);
    assert_eq!(course.created_at.short(), "07.05.2024");
}

#[test]
fn enrolled_since_requires_flag_and_date() {
    let mut course: Course = serde_json::from_str(
        r#"{
            "id": 3,
            "title": "Алгебра",
            "description": "",
            "instructor": {"id": 2, "fullName": "Иванов И.И."},
            "genre": null,
            "createdAt": "2024-05-07T10:00:00",
            "isUserEnrolledInCourse": true,
            "userEnrolledInCourseAt": "2024-05-09T08:30:00"
        }"#,
    )
    .unwrap();
    assert!(course.enrolled_since().is_some());

    course.is_user_enrolled_in_course = false;
    assert!(course.enrolled_since().is_none());

    course.is_user_enrolled_in_course = true;
    course.user_enrolled_in_course_at = None;
    assert!(course.enrolled_since().is_none());
}

#[test]
fn test_summary_tolerates_missing_description() {
    let t: TestSummary = serde_json::from_str(r#"{"id": 1, "title": "Тест 1"}"#).unwrap();
    assert!(t.description.is_none());
    let t: TestSummary =
        serde_json::from_str(r#"{"id": 1, "title": "Тест 1", "description": "вводный"}"#).unwrap();
    assert_eq!(t.description.as_deref(), Some("вводный"));
}

#[test]
fn question_wire_shapes_differ_between_taking_and_authoring() {
    let taking = r#"{"id": 1, "text": "2+2?", "answers": [{"id": 10, "text": "4"}]}"#;
    let q: Question = serde_json::from_str(taking).unwrap();
    assert_eq!(q.text, "2+2?");
    assert_eq!(q.answers[0].id, 10);

    let authoring = NewQuestion {
        question_text: "2+2?".to_string(),
        answers: vec![NewAnswer {
            answer_text: "4".to_string(),
            is_correct: true,
        }],
    };
    let json = serde_json::to_value(&authoring).unwrap();
    assert_eq!(json["questionText"], "2+2?");
    assert_eq!(json["answers"][0]["answerText"], "4");
    assert_eq!(json["answers"][0]["isCorrect"], true);
}

#[test]
fn submit_body_wire_shape() {
    let body = SubmitTestBody {
        answers: vec![
            AnswerSelection {
                question_id: 1,
                answer_id: 10,
            },
            AnswerSelection {
                question_id: 2,
                answer_id: 21,
            },
        ],
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "answers": [
                {"questionId": 1, "answerId": 10},
                {"questionId": 2, "answerId": 21},
            ]
        })
    );
}

#[test]
fn server_date_accepts_both_wire_formats() {
    let zoneless = ServerDate::parse("2024-05-07T10:00:00").unwrap();
    assert_eq!(zoneless.short(), "07.05.2024");

    let zoned = ServerDate::parse("2024-05-07T10:00:00+03:00").unwrap();
    assert_eq!(zoned.short(), "07.05.2024");

    let fractional = ServerDate::parse("2024-05-07T10:00:00.123456").unwrap();
    assert_eq!(fractional.short(), "07.05.2024");

    assert!(ServerDate::parse("07.05.2024").is_none());
}

#[test]
fn server_date_serializes_zoneless_iso() {
    let date = ServerDate::parse("2024-05-07T10:00:00+03:00").unwrap();
    assert_eq!(
        serde_json::to_string(&date).unwrap(),
        "\"2024-05-07T07:00:00\""
    );
    let back: ServerDate = serde_json::from_str("\"2024-05-07T07:00:00\"").unwrap();
    assert_eq!(back, date);
}

#[test]
fn server_date_orders_chronologically() {
    let early = ServerDate::parse("2024-05-07T10:00:00").unwrap();
    let late = ServerDate::parse("2024-05-09T08:30:00").unwrap();
    assert!(early < late);
}

#[test]
fn test_result_decodes_nested_refs() {
    let json = r#"{
        "id": 40,
        "user": {"id": 7, "fullName": "Петров П."},
        "test": {"id": 9, "title": "Тест 1", "courseId": 3},
        "score": 66.7,
        "createdAt": "2024-05-12T10:34:56"
    }"#;
    let result: TestResult = serde_json::from_str(json).unwrap();
    assert_eq!(result.user.full_name, "Петров П.");
    assert_eq!(result.test.course_id, 3);
    assert!((result.score - 66.7).abs() < f64::EPSILON);
}
