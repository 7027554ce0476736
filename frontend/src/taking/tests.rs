use super::*;
use learn164_shared::Answer;

fn question(id: i64, answer_ids: &[i64]) -> Question {
    Question {
        id,
        text: format!("Вопрос {id}"),
        answers: answer_ids
            .iter()
            .map(|&id| Answer {
                id,
                text: format!("Ответ {id}"),
            })
            .collect(),
    }
}

fn three_question_attempt() -> TestAttempt {
    TestAttempt::new(vec![
        question(1, &[10, 11]),
        question(2, &[20, 21]),
        question(3, &[30, 31]),
    ])
}

#[test]
fn fresh_attempt_has_no_answers() {
    let attempt = three_question_attempt();
    assert_eq!(attempt.answered_count(), 0);
    assert_eq!(attempt.total(), 3);
    assert!(!attempt.is_complete());
    assert_eq!(attempt.selected(1), None);
}

#[test]
fn submission_unlocks_only_when_every_question_is_answered() {
    let mut attempt = three_question_attempt();

    attempt.select(1, 10);
    attempt.select(2, 20);
    assert_eq!(attempt.answered_count(), 2);
    assert!(!attempt.is_complete());

    attempt.select(3, 31);
    assert!(attempt.is_complete());
}

#[test]
fn reselecting_overwrites_without_history() {
    let mut attempt = three_question_attempt();

    attempt.select(1, 10);
    attempt.select(1, 11);

    assert_eq!(attempt.selected(1), Some(11));
    assert_eq!(attempt.answered_count(), 1);
}

#[test]
fn unknown_question_ids_are_ignored() {
    let mut attempt = three_question_attempt();
    attempt.select(99, 10);
    assert_eq!(attempt.answered_count(), 0);
    assert!(!attempt.is_complete());
}

#[test]
fn submission_follows_question_order() {
    let mut attempt = three_question_attempt();

    // 乱序作答
    attempt.select(3, 30);
    attempt.select(1, 11);
    attempt.select(2, 21);

    let body = attempt.to_submission();
    let order: Vec<i64> = body.answers.iter().map(|a| a.question_id).collect();
    assert_eq!(order, vec![1, 2, 3]);
    assert_eq!(body.answers[0].answer_id, 11);
    assert_eq!(body.answers[2].answer_id, 30);
}

#[test]
fn empty_test_counts_as_complete() {
    let attempt = TestAttempt::new(Vec::new());
    assert!(attempt.is_complete());
    assert!(attempt.to_submission().answers.is_empty());
}
