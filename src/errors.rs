/*!
 * Error types for the quizbank application.
 *
 * This module contains custom error types for the quiz core and the
 * application layer, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while sampling questions or validating answers
#[derive(Error, Debug)]
pub enum QuizError {
    /// Call arguments outside the accepted range (empty batch, bad limit, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failure in the underlying question store
    #[error("Store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl QuizError {
    /// Returns true if this error was caused by the caller's arguments
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<anyhow::Error> for QuizError {
    fn from(error: anyhow::Error) -> Self {
        Self::Store(error.into())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the quiz core
    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
