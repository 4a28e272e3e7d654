pub mod capacity;
pub mod delivery;
pub mod pricing;
pub mod quality;
pub mod resolution;

use crate::error::{Result, ScorecardError};
use crate::types::scoring::{bounded, Score, MAX_SCORE};

/// `min(10, round(10·numerator/denominator, 2))`, rejecting a zero denominator.
pub(crate) fn ratio_score(numerator: f64, denominator: f64, what: &str) -> Result<Score> {
    if denominator <= 0.0 {
        return Err(ScorecardError::InvalidInput(format!(
            "{what} must be greater than zero"
        )));
    }
    Ok(bounded(MAX_SCORE * numerator / denominator))
}
