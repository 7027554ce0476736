use super::*;

/// 填好一道题的可提交草稿
fn valid_draft() -> TestDraft {
    let mut draft = TestDraft::new();
    draft.title = "Контрольная".to_string();
    draft.set_question_text(0, "2+2?".to_string());
    draft.set_answer_text(0, 0, "4".to_string());
    draft.toggle_correct(0, 0);
    draft.add_answer(0);
    draft.set_answer_text(0, 1, "5".to_string());
    draft
}

#[test]
fn fresh_draft_seeds_one_question_with_one_answer() {
    let draft = TestDraft::new();
    assert_eq!(draft.questions.len(), 1);
    assert_eq!(draft.questions[0].answers.len(), 1);
    assert!(!draft.questions[0].answers[0].is_correct);
}

#[test]
fn removing_a_question_shifts_later_positions() {
    let mut draft = TestDraft::new();
    draft.set_question_text(0, "первый".to_string());
    draft.add_question();
    draft.set_question_text(1, "второй".to_string());
    draft.add_question();
    draft.set_question_text(2, "третий".to_string());

    draft.remove_question(1);

    assert_eq!(draft.questions.len(), 2);
    assert_eq!(draft.questions[0].text, "первый");
    assert_eq!(draft.questions[1].text, "третий");

    // 越界删除无副作用
    draft.remove_question(5);
    assert_eq!(draft.questions.len(), 2);
}

#[test]
fn answers_are_scoped_to_their_question() {
    let mut draft = TestDraft::new();
    draft.add_question();

    draft.add_answer(0);
    assert_eq!(draft.questions[0].answers.len(), 2);
    assert_eq!(draft.questions[1].answers.len(), 1);

    draft.remove_answer(0, 0);
    assert_eq!(draft.questions[0].answers.len(), 1);
    assert_eq!(draft.questions[1].answers.len(), 1);
}

#[test]
fn toggle_flips_only_the_target_flag() {
    let mut draft = TestDraft::new();
    draft.add_answer(0);

    draft.toggle_correct(0, 1);
    assert!(!draft.questions[0].answers[0].is_correct);
    assert!(draft.questions[0].answers[1].is_correct);

    draft.toggle_correct(0, 1);
    assert!(!draft.questions[0].answers[1].is_correct);
}

#[test]
fn edits_out_of_range_are_ignored() {
    let mut draft = TestDraft::new();
    draft.set_question_text(7, "нет такого".to_string());
    draft.set_answer_text(0, 7, "нет такого".to_string());
    draft.toggle_correct(7, 0);

    assert_eq!(draft.questions.len(), 1);
    assert_eq!(draft.questions[0].text, "");
    assert_eq!(draft.questions[0].answers.len(), 1);
    assert!(!draft.questions[0].answers[0].is_correct);
}

#[test]
fn render_keys_are_unique_and_stable() {
    let mut draft = TestDraft::new();
    draft.add_question();
    draft.add_answer(0);

    let first = draft.questions[0].uid;
    let second = draft.questions[1].uid;
    assert_ne!(first, second);
    assert_ne!(
        draft.questions[0].answers[0].uid,
        draft.questions[0].answers[1].uid
    );

    // 删除一项后其余键保持不变
    draft.remove_question(0);
    assert_eq!(draft.questions[0].uid, second);
}

#[test]
fn validation_reports_the_first_problem() {
    let rules = ValidationRules::default();

    let draft = TestDraft::new();
    assert_eq!(draft.validate(&rules), Err(DraftError::EmptyTitle));

    let mut draft = TestDraft::new();
    draft.title = "Тест".to_string();
    draft.questions.clear();
    assert_eq!(draft.validate(&rules), Err(DraftError::NoQuestions));

    let mut draft = valid_draft();
    draft.set_question_text(0, "  ".to_string());
    assert_eq!(
        draft.validate(&rules),
        Err(DraftError::EmptyQuestionText { question: 0 })
    );

    let mut draft = valid_draft();
    draft.set_answer_text(0, 1, String::new());
    assert_eq!(
        draft.validate(&rules),
        Err(DraftError::EmptyAnswerText {
            question: 0,
            answer: 1,
        })
    );
}

#[test]
fn correct_answer_rule_is_switchable() {
    let mut draft = valid_draft();
    draft.toggle_correct(0, 0); // снять единственную отметку

    assert_eq!(
        draft.validate(&ValidationRules::default()),
        Err(DraftError::NoCorrectAnswer { question: 0 })
    );
    assert_eq!(
        draft.validate(&ValidationRules {
            require_correct_answer: false,
        }),
        Ok(())
    );
}

#[test]
fn error_messages_are_localized_with_one_based_positions() {
    assert_eq!(DraftError::EmptyTitle.to_string(), "Укажите название теста");
    assert_eq!(
        DraftError::EmptyQuestionText { question: 1 }.to_string(),
        "Вопрос 2: текст не заполнен"
    );
    assert_eq!(
        DraftError::EmptyAnswerText {
            question: 0,
            answer: 2,
        }
        .to_string(),
        "Вопрос 1, ответ 3: текст не заполнен"
    );
    assert_eq!(
        DraftError::NoCorrectAnswer { question: 0 }.to_string(),
        "Вопрос 1: отметьте хотя бы один правильный ответ"
    );
}

#[test]
fn request_assembly_preserves_entry_order() {
    let mut draft = valid_draft();
    draft.add_question();
    draft.set_question_text(1, "3*3?".to_string());
    draft.set_answer_text(1, 0, "9".to_string());
    draft.toggle_correct(1, 0);

    let request = draft
        .to_request(8, &ValidationRules::default())
        .expect("draft is valid");

    assert_eq!(request.topic_id, 8);
    assert_eq!(request.title, "Контрольная");
    assert_eq!(request.questions.len(), 2);
    assert_eq!(request.questions[0].question_text, "2+2?");
    assert_eq!(request.questions[0].answers.len(), 2);
    assert!(request.questions[0].answers[0].is_correct);
    assert!(!request.questions[0].answers[1].is_correct);
    assert_eq!(request.questions[1].question_text, "3*3?");
}

#[test]
fn invalid_draft_never_becomes_a_request() {
    let draft = TestDraft::new();
    assert!(draft.to_request(8, &ValidationRules::default()).is_err());
}
