/*!
 * # quizbank - random quiz questions and answer scoring
 *
 * A Rust library serving quiz content from a SQLite question bank.
 *
 * ## Features
 *
 * - Sample random questions of a given difficulty, each with its options
 * - Sampling is taken over questions, so questions with many options are
 *   not favoured
 * - Score a batch of submitted answers against the recorded correct answers
 * - Estimate an IQ and percentile from a score
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `database`: SQLite question bank access:
 *   - `database::schema`: Table definitions and versioning
 *   - `database::connection`: Connection handling
 *   - `database::repository`: Question, option and answer queries
 * - `quiz`: The quiz core:
 *   - `quiz::store`: Store abstraction injected into the core
 *   - `quiz::sampler`: Random question sampling
 *   - `quiz::validator`: Answer scoring
 *   - `quiz::scoring`: IQ estimation
 * - `app_controller`: Request defaults and parameter checks
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod quiz;

// Re-export main types for easier usage
pub use app_config::{Config, QuizConfig};
pub use app_controller::{Controller, ValidationOutcome};
pub use database::{Difficulty, Repository};
pub use errors::{AppError, QuizError};
pub use quiz::{AnswerResult, AnswerSubmission, AnswerValidator, QuestionAggregate, RandomQuestionSampler};
