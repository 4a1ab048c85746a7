/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for the question bank queries,
 * abstracting away the SQL details and providing type-safe access.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use rusqlite::{params, params_from_iter};
use std::collections::HashMap;

use super::connection::{DatabaseConnection, DatabaseStats};
use super::models::{Difficulty, OptionRow};
use crate::quiz::store::QuestionStore;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

/// Builds `?,?,?` for an `IN (...)` clause with `count` parameters
fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Get database statistics
    pub async fn stats(&self) -> Result<DatabaseStats> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.stats()).await?
    }

    // =========================================================================
    // Question Operations
    // =========================================================================

    /// Pick up to `limit` random question ids at the given difficulty
    ///
    /// The random order is taken over the `Question` table alone so every
    /// question has the same chance regardless of how many options it has.
    pub async fn random_question_ids(&self, difficulty: Difficulty, limit: usize) -> Result<Vec<i64>> {
        let limit = i64::try_from(limit)?;

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare_cached(
                    r#"
                    SELECT QuestionID
                    FROM Question
                    WHERE Difficulty = ?1
                    ORDER BY RANDOM()
                    LIMIT ?2
                    "#,
                )?;

                let ids = stmt
                    .query_map(params![difficulty.as_str(), limit], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<i64>>>()?;

                debug!("Sampled {} question id(s) at difficulty {}", ids.len(), difficulty);
                Ok(ids)
            })
            .await
    }

    /// Get every option of the given questions, ordered by question then option id
    pub async fn option_rows(&self, question_ids: &[i64]) -> Result<Vec<OptionRow>> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }

        let question_ids = question_ids.to_vec();

        self.db
            .execute_async(move |conn| {
                let sql = format!(
                    r#"
                    SELECT q.QuestionID, q.QuestionText, o.OptionID, o.OptionText
                    FROM Question q
                    JOIN Option o ON q.QuestionID = o.QuestionID
                    WHERE q.QuestionID IN ({})
                    ORDER BY q.QuestionID, o.OptionID
                    "#,
                    placeholders(question_ids.len())
                );

                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(params_from_iter(question_ids.iter()), |row| {
                        Ok(OptionRow {
                            question_id: row.get(0)?,
                            question_text: row.get(1)?,
                            option_id: row.get(2)?,
                            option_text: row.get(3)?,
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                debug!(
                    "Fetched {} option row(s) for {} question(s)",
                    rows.len(),
                    question_ids.len()
                );
                Ok(rows)
            })
            .await
    }

    // =========================================================================
    // Answer Operations
    // =========================================================================

    /// Get the correct option text for each of the given questions
    ///
    /// Questions without a recorded answer are absent from the map. When a
    /// question has several answer rows, the one with the lowest option id wins.
    pub async fn correct_answer_texts(&self, question_ids: &[i64]) -> Result<HashMap<i64, String>> {
        if question_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let question_ids = question_ids.to_vec();

        self.db
            .execute_async(move |conn| {
                let sql = format!(
                    r#"
                    SELECT q.QuestionID, o.OptionText
                    FROM Question q
                    JOIN Answer a ON q.QuestionID = a.QuestionID
                    JOIN Option o ON o.OptionID = a.OptionID
                    WHERE q.QuestionID IN ({})
                    ORDER BY q.QuestionID, a.OptionID
                    "#,
                    placeholders(question_ids.len())
                );

                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(params_from_iter(question_ids.iter()), |row| {
                        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                let mut answers = HashMap::with_capacity(rows.len());
                for (question_id, text) in rows {
                    if answers.contains_key(&question_id) {
                        warn!(
                            "Question {} has more than one recorded answer; ignoring {:?}",
                            question_id, text
                        );
                        continue;
                    }
                    answers.insert(question_id, text);
                }

                Ok(answers)
            })
            .await
    }
}

#[async_trait]
impl QuestionStore for Repository {
    async fn sample_question_ids(&self, difficulty: Difficulty, limit: usize) -> Result<Vec<i64>> {
        self.random_question_ids(difficulty, limit).await
    }

    async fn options_for_questions(&self, question_ids: &[i64]) -> Result<Vec<OptionRow>> {
        self.option_rows(question_ids).await
    }

    async fn correct_answers_for_questions(
        &self,
        question_ids: &[i64],
    ) -> Result<HashMap<i64, String>> {
        self.correct_answer_texts(question_ids).await
    }
}
