//! Library ranking rules.
//!
//! A ranking rule turns a library's projected score into a sort key.
//! **Higher key = signed up earlier.** The scheduler sorts its pool with a
//! stable sort on this key, so equal keys keep their current pool order.

use std::fmt::Debug;

use crate::models::Library;

/// Evaluates how attractive a library is as the next signup.
pub trait RankingRule: Send + Sync + Debug {
    /// Rule name.
    fn name(&self) -> &'static str;

    /// Sort key for a library whose projected score is `best_score`.
    fn key(&self, best_score: u64, library: &Library) -> u64;
}

/// Projected score per signup day, using integer division.
///
/// Integer division is intentional: libraries whose ratios differ only in
/// the fractional part tie and keep their pool order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScorePerSignupDay;

impl RankingRule for ScorePerSignupDay {
    fn name(&self) -> &'static str {
        "score-per-signup-day"
    }

    fn key(&self, best_score: u64, library: &Library) -> u64 {
        best_score
            .checked_div(library.signup_days)
            .unwrap_or(best_score)
    }
}

/// Projected score alone, ignoring signup cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectedScore;

impl RankingRule for ProjectedScore {
    fn name(&self) -> &'static str {
        "projected-score"
    }

    fn key(&self, best_score: u64, _library: &Library) -> u64 {
        best_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_per_signup_day_truncates() {
        let rule = ScorePerSignupDay;
        assert_eq!(rule.key(30, &Library::new(0, 1, 1)), 30);
        assert_eq!(rule.key(30, &Library::new(0, 4, 1)), 7);
        assert_eq!(rule.key(3, &Library::new(0, 4, 1)), 0);
        assert_eq!(rule.name(), "score-per-signup-day");
    }

    #[test]
    fn test_zero_signup_does_not_panic() {
        assert_eq!(ScorePerSignupDay.key(12, &Library::new(0, 0, 1)), 12);
    }

    #[test]
    fn test_projected_score() {
        assert_eq!(ProjectedScore.key(30, &Library::new(0, 4, 1)), 30);
    }
}
