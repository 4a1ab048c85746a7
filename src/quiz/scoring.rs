/*!
 * IQ estimate derived from a raw quiz score.
 *
 * The raw score is placed on a normal curve whose mean and standard
 * deviation depend on the difficulty, then rescaled to the IQ scale
 * (mean 100, standard deviation 15).
 */

use serde::{Deserialize, Serialize};

use crate::database::models::Difficulty;

/// Points of IQ per standard deviation
const IQ_STD_DEV: f64 = 15.0;

/// IQ assigned to a raw score equal to the difficulty mean
const IQ_MEAN: f64 = 100.0;

/// Estimated IQ and percentile for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IqEstimate {
    pub iq: i64,
    /// Clamped to 1..=99
    pub percentile: u8,
}

impl IqEstimate {
    /// Percentile in the `"42th"` form shown to quiz takers
    pub fn percentile_label(&self) -> String {
        format!("{}th", self.percentile)
    }
}

/// Mean and standard deviation of raw scores at a difficulty
fn raw_score_distribution(difficulty: Difficulty) -> (f64, f64) {
    match difficulty {
        Difficulty::Easy => (20.0, 5.0),
        Difficulty::Medium => (50.0, 10.0),
        Difficulty::Hard => (70.0, 15.0),
    }
}

pub fn estimate_iq(difficulty: Difficulty, score: usize) -> IqEstimate {
    let (mean, std_dev) = raw_score_distribution(difficulty);
    let raw_iq = IQ_MEAN + ((score as f64 - mean) / std_dev) * IQ_STD_DEV;

    // Truncation toward zero, taken before rounding
    let percentile = ((raw_iq / 200.0) * 100.0).trunc().clamp(1.0, 99.0) as u8;

    // Halves go to the even neighbour: 26.5 -> 26, 27.5 -> 28
    IqEstimate {
        iq: raw_iq.round_ties_even() as i64,
        percentile,
    }
}
