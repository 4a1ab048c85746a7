/*!
 * Answer scoring against the recorded correct answers.
 */

use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::QuizError;
use crate::quiz::models::{AnswerResult, AnswerSubmission, ValidationReport};
use crate::quiz::store::QuestionStore;

/// Scores batches of submitted answers
#[derive(Clone)]
pub struct AnswerValidator {
    store: Arc<dyn QuestionStore>,
}

impl AnswerValidator {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// Score `submissions` in input order
    ///
    /// Answers are compared exactly (case-sensitive, no trimming). Duplicate
    /// question ids are scored independently. A question with no recorded
    /// answer yields `correct_answer: None` and counts as wrong.
    pub async fn validate(
        &self,
        submissions: &[AnswerSubmission],
    ) -> Result<ValidationReport, QuizError> {
        if submissions.is_empty() {
            return Err(QuizError::InvalidInput(
                "At least one answer must be submitted".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(submissions.len());
        let question_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.question_id)
            .filter(|id| seen.insert(*id))
            .collect();

        let correct_answers = self
            .store
            .correct_answers_for_questions(&question_ids)
            .await?;

        let results: Vec<AnswerResult> = submissions
            .iter()
            .map(|submission| {
                let correct_answer = correct_answers.get(&submission.question_id).cloned();
                let is_correct = correct_answer.as_deref() == Some(submission.answer.as_str());
                AnswerResult {
                    question_id: submission.question_id,
                    user_answer: submission.answer.clone(),
                    correct_answer,
                    is_correct,
                }
            })
            .collect();

        let score = results.iter().filter(|r| r.is_correct).count();

        debug!(
            "Scored {}/{} answer(s) across {} question(s)",
            score,
            results.len(),
            question_ids.len()
        );
        Ok(ValidationReport { score, results })
    }
}
