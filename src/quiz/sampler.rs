/*!
 * Random question sampling.
 *
 * Sampling happens in two phases: the store first picks question ids at
 * random over the question population, then the options of exactly those
 * questions are fetched and folded into aggregates. Sampling the joined
 * question/option rows directly would favour questions with many options.
 */

use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use crate::app_config::QuizConfig;
use crate::database::models::{Difficulty, OptionRow};
use crate::errors::QuizError;
use crate::quiz::models::QuestionAggregate;
use crate::quiz::store::QuestionStore;

/// Samples random questions of a given difficulty
#[derive(Clone)]
pub struct RandomQuestionSampler {
    store: Arc<dyn QuestionStore>,
    valid_difficulties: Vec<Difficulty>,
    max_limit: usize,
}

impl RandomQuestionSampler {
    /// Create a sampler bounded by the quiz configuration
    pub fn new(store: Arc<dyn QuestionStore>, config: &QuizConfig) -> Self {
        Self {
            store,
            valid_difficulties: config.valid_difficulties.clone(),
            max_limit: config.max_limit,
        }
    }

    /// Return up to `limit` random questions at `difficulty`, ordered by question id
    ///
    /// An empty result means no question matched; it is not an error.
    pub async fn sample(
        &self,
        difficulty: Difficulty,
        limit: usize,
    ) -> Result<Vec<QuestionAggregate>, QuizError> {
        if !self.valid_difficulties.contains(&difficulty) {
            return Err(QuizError::InvalidInput(format!(
                "Difficulty '{}' is not enabled",
                difficulty
            )));
        }
        if limit == 0 || limit > self.max_limit {
            return Err(QuizError::InvalidInput(format!(
                "Limit must be between 1 and {}",
                self.max_limit
            )));
        }

        let question_ids = self.store.sample_question_ids(difficulty, limit).await?;
        if question_ids.is_empty() {
            debug!("No questions available at difficulty {}", difficulty);
            return Ok(Vec::new());
        }

        let rows = self.store.options_for_questions(&question_ids).await?;
        let aggregates = group_rows(rows);

        debug!(
            "Sampled {} question(s) at difficulty {} (limit {})",
            aggregates.len(),
            difficulty,
            limit
        );
        Ok(aggregates)
    }
}

/// Fold option rows into one aggregate per question
///
/// Rows are put in (question id, option id) order first, so the output is
/// ascending by question id with options ascending by option id, whatever
/// order the rows arrived in.
pub fn group_rows(mut rows: Vec<OptionRow>) -> Vec<QuestionAggregate> {
    rows.sort_by_key(|row| (row.question_id, row.option_id));

    let mut aggregates: Vec<QuestionAggregate> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let position = *index.entry(row.question_id).or_insert_with(|| {
            aggregates.push(QuestionAggregate {
                question_id: row.question_id,
                question_text: row.question_text.clone(),
                options: Vec::new(),
            });
            aggregates.len() - 1
        });
        aggregates[position].options.push(row.option_text);
    }

    aggregates
}
