/*!
 * Read-only query capability over questions, options and answers.
 */

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

use crate::database::models::{Difficulty, OptionRow};

/// Common trait for question stores
///
/// This trait defines the queries the sampler and validator need, allowing
/// the SQLite repository and test doubles to be used interchangeably.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Select up to `limit` distinct question ids at `difficulty`, in uniform random order
    ///
    /// The random order must be taken over questions, never over the
    /// question/option join.
    async fn sample_question_ids(&self, difficulty: Difficulty, limit: usize) -> Result<Vec<i64>>;

    /// Fetch every option of the given questions, ordered by question id then option id
    async fn options_for_questions(&self, question_ids: &[i64]) -> Result<Vec<OptionRow>>;

    /// Map each given question that has a recorded answer to the correct option text
    async fn correct_answers_for_questions(
        &self,
        question_ids: &[i64],
    ) -> Result<HashMap<i64, String>>;
}
