/*!
 * Database module for the question bank.
 *
 * This module provides SQLite-backed, read-only access to:
 * - Questions and their difficulty
 * - Answer options per question
 * - The recorded correct answer per question
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use models::{Difficulty, OptionRow};
pub use repository::Repository;
