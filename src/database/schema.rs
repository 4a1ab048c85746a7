/*!
 * Database schema definitions.
 *
 * This module contains the SQL schema for the question bank tables. The
 * schema is only ever created in a new or empty file; an existing bank is
 * used as it is.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;

/// Returns true when the database already holds a `Question` table
pub fn bank_exists(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='Question'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check for the Question table")?;

    Ok(count > 0)
}

/// Initialize the database schema
///
/// Creates the tables and indexes when no question bank is present.
/// An existing bank is left untouched.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    // Enforced per connection, not persisted in the file
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    if bank_exists(conn)? {
        debug!("Question bank already present, schema left unchanged");
        return Ok(());
    }

    info!("Creating question bank schema");
    create_all_tables(conn)
}

/// Create all database tables
///
/// Table and column names match the question bank files distributed with
/// the quiz, so an existing `questions.db` opens without conversion.
fn create_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS Question (
            QuestionID INTEGER PRIMARY KEY,
            QuestionText TEXT NOT NULL,
            Difficulty TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_question_difficulty ON Question(Difficulty);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS Option (
            OptionID INTEGER PRIMARY KEY,
            QuestionID INTEGER NOT NULL REFERENCES Question(QuestionID) ON DELETE CASCADE,
            OptionText TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_option_question ON Option(QuestionID);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS Answer (
            AnswerID INTEGER PRIMARY KEY AUTOINCREMENT,
            QuestionID INTEGER NOT NULL REFERENCES Question(QuestionID) ON DELETE CASCADE,
            OptionID INTEGER NOT NULL REFERENCES Option(OptionID) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_answer_question ON Answer(QuestionID);
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}
