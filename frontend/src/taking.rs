//! 答题状态核心
//!
//! 流程：Loading -> Answering -> Submitted，加载或交卷失败进入
//! Failed 终态（重新进入页面才能重来）。作答过程完全在内存中，
//! 离开页面即丢弃，不支持续答。

use std::collections::HashMap;

use learn164_shared::{AnswerSelection, Question, SubmitTestBody, TestResult};

/// 答题页面的阶段
#[derive(Debug, Clone, PartialEq)]
pub enum TakePhase {
    Loading,
    /// 加载或交卷失败；不可恢复
    Failed(String),
    /// 作答中，持有全部题目与当前选择
    Answering(TestAttempt),
    /// 交卷成功，持有服务端计算的成绩
    Submitted(TestResult),
}

/// 一次作答：题目列表加「题目 -> 所选答案」映射
#[derive(Debug, Clone, PartialEq)]
pub struct TestAttempt {
    questions: Vec<Question>,
    selections: HashMap<i64, i64>,
}

impl TestAttempt {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            selections: HashMap::new(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// 记录选择；同一题重复选择直接覆盖，不留历史
    ///
    /// 未知题号忽略，保证已答集合始终是题目集合的子集。
    pub fn select(&mut self, question_id: i64, answer_id: i64) {
        if self.questions.iter().any(|q| q.id == question_id) {
            self.selections.insert(question_id, answer_id);
        }
    }

    /// 某题当前选中的答案
    pub fn selected(&self, question_id: i64) -> Option<i64> {
        self.selections.get(&question_id).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.selections.len()
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// 是否可以交卷：已答数等于题目总数
    pub fn is_complete(&self) -> bool {
        self.answered_count() == self.total()
    }

    /// 装配交卷请求体，按题目顺序排列
    pub fn to_submission(&self) -> SubmitTestBody {
        SubmitTestBody {
            answers: self
                .questions
                .iter()
                .filter_map(|question| {
                    self.selections.get(&question.id).map(|answer_id| {
                        AnswerSelection {
                            question_id: question.id,
                            answer_id: *answer_id,
                        }
                    })
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests;
