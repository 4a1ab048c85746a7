use anyhow::{anyhow, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::database::models::Difficulty;
use crate::errors::AppError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Path of the SQLite question bank
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Quiz request settings
    #[serde(default)]
    pub quiz: QuizConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Limits and defaults applied to quiz requests
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuizConfig {
    /// Difficulties callers may ask for
    #[serde(default = "default_valid_difficulties")]
    pub valid_difficulties: Vec<Difficulty>,

    /// Difficulty used when a request names none
    #[serde(default = "default_difficulty")]
    pub default_difficulty: Difficulty,

    /// Question count used when a request names none
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Largest question count a single request may ask for
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            valid_difficulties: default_valid_difficulties(),
            default_difficulty: default_difficulty(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl QuizConfig {
    /// Comma-separated list of the enabled difficulties
    pub fn difficulty_choices(&self) -> String {
        self.valid_difficulties
            .iter()
            .map(Difficulty::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./db/questions.db")
}

fn default_valid_difficulties() -> Vec<Difficulty> {
    Difficulty::ALL.to_vec()
}

fn default_difficulty() -> Difficulty {
    Difficulty::Easy
}

fn default_limit() -> usize {
    15
}

fn default_max_limit() -> usize {
    50
}

impl Config {
    /// Load the configuration from a JSON file, writing defaults if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content).map_err(|e| {
                AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)?;
        std::fs::write(path, config_json)?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let quiz = &self.quiz;

        if quiz.valid_difficulties.is_empty() {
            return Err(anyhow!("At least one difficulty must be enabled"));
        }

        if !quiz.valid_difficulties.contains(&quiz.default_difficulty) {
            return Err(anyhow!(
                "Default difficulty '{}' is not one of the enabled difficulties ({})",
                quiz.default_difficulty,
                quiz.difficulty_choices()
            ));
        }

        if quiz.max_limit == 0 {
            return Err(anyhow!("Maximum limit must be at least 1"));
        }

        if quiz.default_limit == 0 || quiz.default_limit > quiz.max_limit {
            return Err(anyhow!(
                "Default limit must be between 1 and {}",
                quiz.max_limit
            ));
        }

        if self.database_path.as_os_str().is_empty() {
            return Err(anyhow!("Database path must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: default_database_path(),
            quiz: QuizConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
