//! Greedy signup scheduling and score accumulation.
//!
//! # Algorithm
//!
//! `GreedyScheduler` repeatedly ranks every remaining library by projected
//! score per signup day, activates the best one if its signup fits before
//! the deadline, and gives it the most valuable unclaimed books its
//! scanning window allows. It is a heuristic: fast, deterministic, not
//! optimal.
//!
//! # Scoring
//!
//! `tally` and `ScoreSummary` credit each distinct book once.

mod estimate;
mod greedy;
mod ranking;
mod score;

pub use estimate::{day_budget, estimate};
pub use greedy::{ClaimPolicy, Decision, GreedyScheduler, ScheduleOutcome};
pub use ranking::{ProjectedScore, RankingRule, ScorePerSignupDay};
pub use score::{tally, ScoreSummary};
