//! 出题表单状态核心
//!
//! 测验在提交前是一棵内存中的草稿树：题目有序列表，每道题
//! 挂一组备选答案。所有编辑操作同步就地完成，不发网络请求；
//! 点保存时整树校验一次，装配成创建请求发给服务端。
//!
//! 与列表核心一样不碰 DOM，原生目标可直接测试。

use std::sync::atomic::{AtomicU64, Ordering};

use learn164_shared::protocol::CreateTestRequest;
use learn164_shared::{NewAnswer, NewQuestion};

/// 列表渲染用的稳定键；只在客户端内存里有意义，不上网络
fn next_uid() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// 备选答案草稿
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerDraft {
    pub uid: u64,
    pub text: String,
    pub is_correct: bool,
}

impl AnswerDraft {
    pub fn empty() -> Self {
        Self {
            uid: next_uid(),
            text: String::new(),
            is_correct: false,
        }
    }
}

/// 题目草稿
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDraft {
    pub uid: u64,
    pub text: String,
    pub answers: Vec<AnswerDraft>,
}

impl QuestionDraft {
    /// 新题自带一个空答案行，省一次点击
    pub fn empty() -> Self {
        Self {
            uid: next_uid(),
            text: String::new(),
            answers: vec![AnswerDraft::empty()],
        }
    }
}

/// 校验规则
///
/// 「每题至少一个正确答案」的检查原端上没有做，服务端行为
/// 未知，这里做成可配置开关，默认开启。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub require_correct_answer: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            require_correct_answer: true,
        }
    }
}

/// 草稿校验错误；位置从零计，展示时加一
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    EmptyTitle,
    NoQuestions,
    EmptyQuestionText { question: usize },
    EmptyAnswerText { question: usize, answer: usize },
    NoCorrectAnswer { question: usize },
}

impl core::fmt::Display for DraftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DraftError::EmptyTitle => write!(f, "Укажите название теста"),
            DraftError::NoQuestions => write!(f, "Добавьте хотя бы один вопрос"),
            DraftError::EmptyQuestionText { question } => {
                write!(f, "Вопрос {}: текст не заполнен", question + 1)
            }
            DraftError::EmptyAnswerText { question, answer } => {
                write!(
                    f,
                    "Вопрос {}, ответ {}: текст не заполнен",
                    question + 1,
                    answer + 1
                )
            }
            DraftError::NoCorrectAnswer { question } => {
                write!(
                    f,
                    "Вопрос {}: отметьте хотя бы один правильный ответ",
                    question + 1
                )
            }
        }
    }
}

impl std::error::Error for DraftError {}

/// 整份测验的草稿树
#[derive(Debug, Clone, PartialEq)]
pub struct TestDraft {
    pub title: String,
    pub questions: Vec<QuestionDraft>,
}

impl TestDraft {
    /// 初始草稿：一道空题
    pub fn new() -> Self {
        Self {
            title: String::new(),
            questions: vec![QuestionDraft::empty()],
        }
    }

    pub fn add_question(&mut self) {
        self.questions.push(QuestionDraft::empty());
    }

    /// 删除题目，后续题目位置前移；越界忽略
    pub fn remove_question(&mut self, index: usize) {
        if index < self.questions.len() {
            self.questions.remove(index);
        }
    }

    pub fn set_question_text(&mut self, index: usize, text: String) {
        if let Some(question) = self.questions.get_mut(index) {
            question.text = text;
        }
    }

    pub fn add_answer(&mut self, question: usize) {
        if let Some(question) = self.questions.get_mut(question) {
            question.answers.push(AnswerDraft::empty());
        }
    }

    /// 删除某题内的答案；越界忽略
    pub fn remove_answer(&mut self, question: usize, answer: usize) {
        if let Some(question) = self.questions.get_mut(question) {
            if answer < question.answers.len() {
                question.answers.remove(answer);
            }
        }
    }

    pub fn set_answer_text(&mut self, question: usize, answer: usize, text: String) {
        if let Some(answer) = self
            .questions
            .get_mut(question)
            .and_then(|q| q.answers.get_mut(answer))
        {
            answer.text = text;
        }
    }

    pub fn toggle_correct(&mut self, question: usize, answer: usize) {
        if let Some(answer) = self
            .questions
            .get_mut(question)
            .and_then(|q| q.answers.get_mut(answer))
        {
            answer.is_correct = !answer.is_correct;
        }
    }

    /// 整树校验，报出第一处问题
    ///
    /// 顺序：标题、有无题目，然后逐题检查题干、答案文本、
    /// 正确答案标记（开关控制）。
    pub fn validate(&self, rules: &ValidationRules) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if self.questions.is_empty() {
            return Err(DraftError::NoQuestions);
        }

        for (qi, question) in self.questions.iter().enumerate() {
            if question.text.trim().is_empty() {
                return Err(DraftError::EmptyQuestionText { question: qi });
            }
            for (ai, answer) in question.answers.iter().enumerate() {
                if answer.text.trim().is_empty() {
                    return Err(DraftError::EmptyAnswerText {
                        question: qi,
                        answer: ai,
                    });
                }
            }
            if rules.require_correct_answer && !question.answers.iter().any(|a| a.is_correct) {
                return Err(DraftError::NoCorrectAnswer { question: qi });
            }
        }
        Ok(())
    }

    /// 草稿树转协议题目数组，保持录入顺序
    pub fn to_questions(&self) -> Vec<NewQuestion> {
        self.questions
            .iter()
            .map(|question| NewQuestion {
                question_text: question.text.clone(),
                answers: question
                    .answers
                    .iter()
                    .map(|answer| NewAnswer {
                        answer_text: answer.text.clone(),
                        is_correct: answer.is_correct,
                    })
                    .collect(),
            })
            .collect()
    }

    /// 校验通过后装配创建请求
    pub fn to_request(
        &self,
        topic_id: i64,
        rules: &ValidationRules,
    ) -> Result<CreateTestRequest, DraftError> {
        self.validate(rules)?;
        Ok(CreateTestRequest {
            topic_id,
            title: self.title.clone(),
            questions: self.to_questions(),
        })
    }
}

impl Default for TestDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
