/*!
 * Mock question store for testing
 *
 * Keeps questions, options and answers in memory, samples with `rand`, and
 * records every call so tests can check how the core talks to its store.
 */

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::seq::{IndexedRandom, SliceRandom};
use std::collections::HashMap;

use quizbank::database::models::{Difficulty, OptionRow};
use quizbank::quiz::QuestionStore;

/// A call received by the mock store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    SampleIds { difficulty: Difficulty, limit: usize },
    Options(Vec<i64>),
    Answers(Vec<i64>),
}

/// In-memory question bank
#[derive(Default)]
pub struct MockQuestionStore {
    questions: Vec<(i64, String, Difficulty)>,
    options: Vec<OptionRow>,
    answers: HashMap<i64, i64>,
    calls: Mutex<Vec<StoreCall>>,
    /// Should every call fail
    pub should_fail: bool,
}

impl MockQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a question with its options; `correct` indexes into `options`
    pub fn with_question(
        mut self,
        id: i64,
        text: &str,
        difficulty: Difficulty,
        options: &[&str],
        correct: Option<usize>,
    ) -> Self {
        self.questions.push((id, text.to_string(), difficulty));
        for (index, option) in options.iter().enumerate() {
            let option_id = id * 100 + index as i64;
            self.options.push(OptionRow::new(id, text, option_id, *option));
            if correct == Some(index) {
                self.answers.insert(id, option_id);
            }
        }
        self
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// All calls received so far
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: StoreCall) -> Result<()> {
        self.calls.lock().push(call);
        if self.should_fail {
            return Err(anyhow!("mock store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl QuestionStore for MockQuestionStore {
    async fn sample_question_ids(&self, difficulty: Difficulty, limit: usize) -> Result<Vec<i64>> {
        self.record(StoreCall::SampleIds { difficulty, limit })?;

        let population: Vec<i64> = self
            .questions
            .iter()
            .filter(|(_, _, d)| *d == difficulty)
            .map(|(id, _, _)| *id)
            .collect();

        Ok(population
            .choose_multiple(&mut rand::rng(), limit)
            .copied()
            .collect())
    }

    async fn options_for_questions(&self, question_ids: &[i64]) -> Result<Vec<OptionRow>> {
        self.record(StoreCall::Options(question_ids.to_vec()))?;

        let mut rows: Vec<OptionRow> = self
            .options
            .iter()
            .filter(|row| question_ids.contains(&row.question_id))
            .cloned()
            .collect();

        // Hand rows back unordered; ordering is the caller's job
        rows.shuffle(&mut rand::rng());
        Ok(rows)
    }

    async fn correct_answers_for_questions(
        &self,
        question_ids: &[i64],
    ) -> Result<HashMap<i64, String>> {
        self.record(StoreCall::Answers(question_ids.to_vec()))?;

        Ok(question_ids
            .iter()
            .filter_map(|id| {
                let option_id = self.answers.get(id)?;
                self.options
                    .iter()
                    .find(|row| row.option_id == *option_id)
                    .map(|row| (*id, row.option_text.clone()))
            })
            .collect())
    }
}
