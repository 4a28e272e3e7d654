use super::ratio_score;
use crate::error::{Result, ScorecardError};
use crate::types::scoring::Score;

/// Closed CAPA issues against total. No issues at all scores 0, not 10.
pub fn issue_resolution_score(total: u32, closed: u32) -> Result<Score> {
    if total == 0 {
        return Ok(0.0);
    }
    if closed > total {
        return Err(ScorecardError::InvalidInput(format!(
            "closed CAPA issues ({closed}) exceed total ({total})"
        )));
    }
    ratio_score(f64::from(closed), f64::from(total), "CAPA issue total")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_issues_scores_zero() {
        assert_eq!(issue_resolution_score(0, 0).expect("valid"), 0.0);
    }

    #[test]
    fn partial_resolution_scores_proportionally() {
        assert_eq!(issue_resolution_score(5, 3).expect("valid"), 6.0);
        assert_eq!(issue_resolution_score(3, 1).expect("valid"), 3.33);
    }

    #[test]
    fn full_resolution_scores_ten() {
        assert_eq!(issue_resolution_score(4, 4).expect("valid"), 10.0);
    }

    #[test]
    fn closed_above_total_is_rejected() {
        assert!(issue_resolution_score(2, 3).is_err());
    }
}
