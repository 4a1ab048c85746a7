use anyhow::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app_config::{Config, QuizConfig};
use crate::database::models::Difficulty;
use crate::database::{DatabaseConnection, DatabaseStats, Repository};
use crate::errors::QuizError;
use crate::quiz::models::{AnswerResult, AnswerSubmission, QuestionAggregate};
use crate::quiz::scoring::estimate_iq;
use crate::quiz::store::QuestionStore;
use crate::quiz::{AnswerValidator, RandomQuestionSampler};

/// Scored batch together with the IQ estimate for its difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub score: usize,
    pub iq: i64,
    /// Percentile label, e.g. `"50th"`
    pub percentile: String,
    pub results: Vec<AnswerResult>,
}

/// Main application controller
///
/// Applies request defaults and parameter checks, then hands off to the
/// sampler and validator.
pub struct Controller {
    config: QuizConfig,
    sampler: RandomQuestionSampler,
    validator: AnswerValidator,
    repository: Option<Repository>,
}

impl Controller {
    /// Open the configured database and build a controller on top of it
    pub fn with_config(config: Config) -> Result<Self> {
        let db = DatabaseConnection::new(&config.database_path)?;
        let repository = Repository::new(db);
        info!("Question bank ready at {:?}", config.database_path);

        let mut controller = Self::with_store(Arc::new(repository.clone()), config.quiz);
        controller.repository = Some(repository);
        Ok(controller)
    }

    /// Build a controller over any question store
    pub fn with_store(store: Arc<dyn QuestionStore>, config: QuizConfig) -> Self {
        Self {
            sampler: RandomQuestionSampler::new(store.clone(), &config),
            validator: AnswerValidator::new(store),
            config,
            repository: None,
        }
    }

    /// Resolve the requested difficulty, falling back to the configured default
    fn resolve_difficulty(&self, difficulty: Option<&str>) -> Result<Difficulty, QuizError> {
        let Some(raw) = difficulty else {
            return Ok(self.config.default_difficulty);
        };

        raw.parse::<Difficulty>()
            .ok()
            .filter(|d| self.config.valid_difficulties.contains(d))
            .ok_or_else(|| {
                QuizError::InvalidInput(format!(
                    "Invalid difficulty level '{}'. Choose from [{}]",
                    raw,
                    self.config.difficulty_choices()
                ))
            })
    }

    /// Random questions for a request; an empty result means nothing matched
    pub async fn random_questions(
        &self,
        difficulty: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<QuestionAggregate>, QuizError> {
        let difficulty = self.resolve_difficulty(difficulty)?;
        let limit = limit.unwrap_or(self.config.default_limit);

        if !(1..=self.config.max_limit).contains(&limit) {
            return Err(QuizError::InvalidInput(format!(
                "Limit must be between 1 and {}",
                self.config.max_limit
            )));
        }

        debug!("Requesting {} question(s) at difficulty {}", limit, difficulty);
        self.sampler.sample(difficulty, limit).await
    }

    /// Score a batch of answers and attach the IQ estimate for `difficulty`
    pub async fn validate_answers(
        &self,
        submissions: &[AnswerSubmission],
        difficulty: Option<&str>,
    ) -> Result<ValidationOutcome, QuizError> {
        let difficulty = self.resolve_difficulty(difficulty)?;
        let report = self.validator.validate(submissions).await?;
        let estimate = estimate_iq(difficulty, report.score);

        Ok(ValidationOutcome {
            score: report.score,
            iq: estimate.iq,
            percentile: estimate.percentile_label(),
            results: report.results,
        })
    }

    /// Statistics of the backing database, when the controller owns one
    pub async fn stats(&self) -> Result<Option<DatabaseStats>> {
        match &self.repository {
            Some(repository) => Ok(Some(repository.stats().await?)),
            None => Ok(None),
        }
    }
}
