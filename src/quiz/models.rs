/*!
 * Shapes returned by the quiz core.
 */

use serde::{Deserialize, Serialize};

/// A question together with its ordered option texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAggregate {
    pub question_id: i64,
    #[serde(rename = "question")]
    pub question_text: String,
    pub options: Vec<String>,
}

/// One submitted answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub question_id: i64,
    pub answer: String,
}

impl AnswerSubmission {
    pub fn new(question_id: i64, answer: impl Into<String>) -> Self {
        Self {
            question_id,
            answer: answer.into(),
        }
    }
}

/// Outcome for a single submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    pub question_id: i64,
    pub user_answer: String,
    /// `None` when the question has no recorded answer
    pub correct_answer: Option<String>,
    pub is_correct: bool,
}

/// Score and per-item results for a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub score: usize,
    pub results: Vec<AnswerResult>,
}
