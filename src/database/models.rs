/*!
 * Database entity models.
 *
 * These structures map directly to the question bank tables and provide
 * type-safe access to stored data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty classification of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Value stored in the `Difficulty` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses a difficulty name, ignoring case and surrounding whitespace
///
/// This is looser than an exact-name check: `" HARD "` parses as
/// [`Difficulty::Hard`]. Callers that must accept only the lowercase names
/// should compare against [`Difficulty::as_str`] instead.
impl std::str::FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(anyhow::anyhow!("Invalid difficulty: {}", s)),
        }
    }
}

/// One row of the question/option join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub question_id: i64,
    pub question_text: String,
    pub option_id: i64,
    pub option_text: String,
}

impl OptionRow {
    pub fn new(
        question_id: i64,
        question_text: impl Into<String>,
        option_id: i64,
        option_text: impl Into<String>,
    ) -> Self {
        Self {
            question_id,
            question_text: question_text.into(),
            option_id,
            option_text: option_text.into(),
        }
    }
}

/// Question count for a single difficulty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifficultyCount {
    pub difficulty: String,
    pub questions: i64,
}
