//! Greedy signup scheduler.
//!
//! # Algorithm
//!
//! Until the pool is empty:
//! 1. **Rank**: project every pooled library's score if it signed up now,
//!    skipping books already claimed.
//! 2. **Select**: stable-sort the pool by ranking key (descending), take
//!    the first library out of the pool for good.
//! 3. **Commit** if its signup finishes before the deadline: advance the
//!    clock, claim the best unclaimed books that fit, re-score them.
//! 4. **Reject** when the assignment is empty or below `min_score`: the
//!    clock is rewound. Claims follow the [`ClaimPolicy`].
//!
//! # Complexity
//! O(L² · (B + log L)) where L = libraries, B = books per library.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, trace};

use super::estimate::{day_budget, estimate};
use super::ranking::{RankingRule, ScorePerSignupDay};
use crate::models::{Assignment, ClaimSet, Instance, Library, LibraryId, Schedule};

/// What happens to books claimed by a commitment that is then rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimPolicy {
    /// Claims stay in place; those books are lost to later libraries.
    #[default]
    Retain,
    /// Claims are released so later libraries may take the books.
    Release,
}

/// Outcome of evaluating one library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Activation committed with the given score.
    Committed {
        /// Score of the assigned books.
        score: u64,
    },
    /// Signup would not finish before the deadline.
    PastDeadline,
    /// No unclaimed book was left to assign.
    NothingToScan,
    /// Assignment score fell below the threshold.
    BelowThreshold {
        /// Score of the rejected assignment.
        score: u64,
    },
}

impl Decision {
    /// Whether the library was activated.
    pub fn is_committed(&self) -> bool {
        matches!(self, Decision::Committed { .. })
    }
}

/// Result of a scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Committed activations.
    pub schedule: Schedule,
    /// Every evaluated library with its decision, in evaluation order.
    pub decisions: Vec<(LibraryId, Decision)>,
    /// Books left claimed at the end of the run.
    pub claimed_books: usize,
}

impl ScheduleOutcome {
    /// Number of libraries that were evaluated but not activated.
    pub fn rejected_count(&self) -> usize {
        self.decisions
            .iter()
            .filter(|(_, d)| !d.is_committed())
            .count()
    }
}

#[derive(Debug)]
struct Candidate<'a> {
    library: &'a Library,
    best_score: u64,
    key: u64,
}

/// Greedy signup scheduler.
///
/// # Example
///
/// ```
/// use u_scan::models::{BookCatalog, Instance, Library};
/// use u_scan::scheduler::GreedyScheduler;
///
/// let catalog = BookCatalog::from_values([10, 20]);
/// let library = Library::new(0, 1, 1).with_books(vec![0, 1]);
/// let instance = Instance::new(3, catalog, vec![library]);
///
/// let outcome = GreedyScheduler::new().schedule(&instance);
/// assert_eq!(outcome.schedule.assignment_count(), 1);
/// assert_eq!(outcome.schedule.assignments[0].books, vec![1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyScheduler {
    min_score: u64,
    claim_policy: ClaimPolicy,
    rule: Arc<dyn RankingRule>,
}

impl GreedyScheduler {
    /// Creates a scheduler with no score threshold, retaining claims on
    /// rejection, ranking by score per signup day.
    pub fn new() -> Self {
        Self {
            min_score: 0,
            claim_policy: ClaimPolicy::Retain,
            rule: Arc::new(ScorePerSignupDay),
        }
    }

    /// Sets the minimum score an activation must reach to be committed.
    pub fn with_min_score(mut self, min_score: u64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Sets the claim policy for rejected activations.
    pub fn with_claim_policy(mut self, policy: ClaimPolicy) -> Self {
        self.claim_policy = policy;
        self
    }

    /// Sets the ranking rule.
    pub fn with_rule<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rule = Arc::new(rule);
        self
    }

    /// Runs the greedy loop over an instance.
    pub fn schedule(&self, instance: &Instance) -> ScheduleOutcome {
        let span = info_span!(
            "greedy",
            libraries = instance.libraries.len(),
            days = instance.days,
            min_score = self.min_score,
        );
        let _guard = span.enter();

        let catalog = &instance.catalog;
        let total_days = instance.days;
        let mut claims = ClaimSet::new(catalog.len());
        let mut schedule = Schedule::new();
        let mut decisions = Vec::with_capacity(instance.libraries.len());
        let mut elapsed: u64 = 0;

        let mut pool: Vec<Candidate<'_>> = instance
            .libraries
            .iter()
            .map(|library| Candidate {
                library,
                best_score: 0,
                key: 0,
            })
            .collect();

        while !pool.is_empty() {
            for candidate in pool.iter_mut() {
                let lib = candidate.library;
                let budget = day_budget(total_days, lib.signup_days, elapsed);
                candidate.best_score =
                    estimate(&lib.books, lib.books_per_day, budget, true, catalog, &claims);
                candidate.key = self.rule.key(candidate.best_score, lib);
            }

            // Stable: ties keep the order left by the previous iteration
            pool.sort_by(|a, b| b.key.cmp(&a.key));
            let chosen = pool.remove(0);
            let lib = chosen.library;
            trace!(
                library = lib.id,
                best_score = chosen.best_score,
                key = chosen.key,
                "selected"
            );

            if elapsed.saturating_add(lib.signup_days) >= total_days {
                debug!(library = lib.id, elapsed, "signup past deadline");
                decisions.push((lib.id, Decision::PastDeadline));
                continue;
            }

            let start = elapsed;
            elapsed += lib.signup_days;
            let scan_days = total_days - elapsed;
            let capacity = lib.capacity(scan_days);

            let mut books = Vec::new();
            for &book in &lib.books {
                if books.len() as u64 >= capacity {
                    break;
                }
                if claims.claim(book) {
                    books.push(book);
                }
            }

            let score = estimate(&books, lib.books_per_day, scan_days, false, catalog, &claims);

            let rejection = if books.is_empty() {
                Some(Decision::NothingToScan)
            } else if score < self.min_score {
                Some(Decision::BelowThreshold { score })
            } else {
                None
            };

            if let Some(decision) = rejection {
                elapsed = start;
                if self.claim_policy == ClaimPolicy::Release {
                    for &book in &books {
                        claims.release(book);
                    }
                }
                debug!(library = lib.id, score, ?decision, "activation rejected");
                decisions.push((lib.id, decision));
                continue;
            }

            debug!(
                library = lib.id,
                start,
                scan_days,
                books = books.len(),
                score,
                "activation committed"
            );
            schedule.add_assignment(
                Assignment::new(lib.id, start, scan_days)
                    .with_books(books)
                    .with_books_per_day(lib.books_per_day),
            );
            decisions.push((lib.id, Decision::Committed { score }));
        }

        schedule.elapsed_days = elapsed;
        info!(
            committed = schedule.assignment_count(),
            elapsed_days = elapsed,
            claimed = claims.claimed_count(),
            "schedule complete"
        );

        ScheduleOutcome {
            schedule,
            decisions,
            claimed_books: claims.claimed_count(),
        }
    }
}

impl Default for GreedyScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookCatalog, InstanceGenerator};
    use crate::scheduler::ranking::ProjectedScore;
    use crate::scheduler::tally;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    /// Two books [10, 20], one library (signup 1, 1 book/day) listing both.
    fn two_book_instance(days: u64) -> Instance {
        let catalog = BookCatalog::from_values([10, 20]);
        let library = Library::new(0, 1, 1).with_books(vec![1, 0]);
        Instance::new(days, catalog, vec![library])
    }

    #[test]
    fn test_single_library_claims_all() {
        let instance = two_book_instance(3);
        let outcome = GreedyScheduler::new().schedule(&instance);

        assert_eq!(outcome.schedule.assignment_count(), 1);
        let a = &outcome.schedule.assignments[0];
        assert_eq!(a.library_id, 0);
        assert_eq!(a.signup_start_day, 0);
        assert_eq!(a.scan_days, 2);
        assert_eq!(a.books, vec![1, 0]);
        assert_eq!(tally(&outcome.schedule, &instance.catalog), 30);
        assert_eq!(outcome.decisions, vec![(0, Decision::Committed { score: 30 })]);
    }

    #[test]
    fn test_signup_past_deadline() {
        let instance = two_book_instance(1);
        let outcome = GreedyScheduler::new().schedule(&instance);

        assert!(outcome.schedule.is_empty());
        assert_eq!(outcome.schedule.elapsed_days, 0);
        assert_eq!(outcome.decisions, vec![(0, Decision::PastDeadline)]);
        assert_eq!(outcome.claimed_books, 0);
        assert_eq!(tally(&outcome.schedule, &instance.catalog), 0);
    }

    #[test]
    fn test_below_threshold_retains_claims() {
        let instance = two_book_instance(3);
        let outcome = GreedyScheduler::new().with_min_score(50).schedule(&instance);

        assert!(outcome.schedule.is_empty());
        assert_eq!(outcome.schedule.elapsed_days, 0);
        assert_eq!(
            outcome.decisions,
            vec![(0, Decision::BelowThreshold { score: 30 })]
        );
        assert_eq!(outcome.claimed_books, 2);
    }

    #[test]
    fn test_threshold_equal_commits() {
        let instance = two_book_instance(3);
        let outcome = GreedyScheduler::new().with_min_score(30).schedule(&instance);

        assert_eq!(outcome.schedule.assignment_count(), 1);
        assert_eq!(outcome.decisions, vec![(0, Decision::Committed { score: 30 })]);
    }

    #[test]
    fn test_huge_values_saturate() {
        let half = u64::MAX / 2 + 1;
        let catalog = BookCatalog::from_values([half, half]);
        let library = Library::new(0, 1, 1).with_books(vec![0, 1]);
        let instance = Instance::new(5, catalog, vec![library]);
        let outcome = GreedyScheduler::new().schedule(&instance);

        assert_eq!(outcome.decisions, vec![(0, Decision::Committed { score: u64::MAX })]);
        assert_eq!(tally(&outcome.schedule, &instance.catalog), u64::MAX);
    }

    /// Library 0 is picked first, fails the threshold, and with `Retain`
    /// takes its books down with it; library 1 lists the same books.
    fn shared_books_instance() -> Instance {
        let catalog = BookCatalog::from_values([10, 20, 5]);
        let libraries = vec![
            Library::new(0, 1, 2).with_books(vec![0, 1]),
            Library::new(1, 2, 3).with_books(vec![0, 1, 2]),
        ];
        Instance::new(4, catalog, libraries)
    }

    #[test]
    fn test_retained_claims_block_later_libraries() {
        let instance = shared_books_instance();
        let outcome = GreedyScheduler::new().with_min_score(31).schedule(&instance);

        // Lib 0: key 30/1 = 30 beats lib 1: 35/2 = 17. Score 30 < 31 → rejected.
        // Lib 1 can then only take book 2 (5) → also rejected.
        assert!(outcome.schedule.is_empty());
        assert_eq!(
            outcome.decisions,
            vec![
                (0, Decision::BelowThreshold { score: 30 }),
                (1, Decision::BelowThreshold { score: 5 }),
            ]
        );
        assert_eq!(outcome.claimed_books, 3);
    }

    #[test]
    fn test_released_claims_available_to_later_libraries() {
        let instance = shared_books_instance();
        let outcome = GreedyScheduler::new()
            .with_min_score(31)
            .with_claim_policy(ClaimPolicy::Release)
            .schedule(&instance);

        assert_eq!(outcome.schedule.assignment_count(), 1);
        let a = &outcome.schedule.assignments[0];
        assert_eq!(a.library_id, 1);
        assert_eq!(a.signup_start_day, 0);
        assert_eq!(a.books, vec![1, 0, 2]);
        assert_eq!(tally(&outcome.schedule, &instance.catalog), 35);
    }

    #[test]
    fn test_ratio_ordering_and_clock() {
        // Lib 0: signup 2, lib 1: signup 1, disjoint books.
        let catalog = BookCatalog::from_values([50, 40, 30, 20]);
        let libraries = vec![
            Library::new(0, 2, 1).with_books(vec![0, 1]),
            Library::new(1, 1, 1).with_books(vec![2, 3]),
        ];
        let instance = Instance::new(5, catalog, libraries);
        let outcome = GreedyScheduler::new().schedule(&instance);

        // Day 0: lib0 budget 3 → 90/2 = 45; lib1 budget 4 → 50/1 = 50.
        let s = &outcome.schedule;
        assert_eq!(s.assignment_count(), 2);
        assert_eq!(s.assignments[0].library_id, 1);
        assert_eq!(s.assignments[0].signup_start_day, 0);
        assert_eq!(s.assignments[0].scan_days, 4);
        assert_eq!(s.assignments[1].library_id, 0);
        assert_eq!(s.assignments[1].signup_start_day, 1);
        assert_eq!(s.assignments[1].scan_days, 2);
        assert_eq!(s.elapsed_days, 3);
        assert_eq!(tally(s, &instance.catalog), 140);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let catalog = BookCatalog::from_values([10, 10]);
        let libraries = vec![
            Library::new(0, 1, 1).with_books(vec![0]),
            Library::new(1, 1, 1).with_books(vec![1]),
        ];
        let instance = Instance::new(10, catalog, libraries);
        let outcome = GreedyScheduler::new().schedule(&instance);
        let order: Vec<_> = outcome.decisions.iter().map(|(id, _)| *id).collect();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_fully_claimed_library_is_nothing_to_scan() {
        let catalog = BookCatalog::from_values([10]);
        let libraries = vec![
            Library::new(0, 1, 1).with_books(vec![0]),
            Library::new(1, 1, 1).with_books(vec![0]),
        ];
        let instance = Instance::new(10, catalog, libraries);
        let outcome = GreedyScheduler::new().schedule(&instance);

        assert_eq!(outcome.schedule.assignment_count(), 1);
        assert_eq!(outcome.decisions[1], (1, Decision::NothingToScan));
        assert_eq!(outcome.schedule.elapsed_days, 1);
        assert_eq!(outcome.rejected_count(), 1);
    }

    #[test]
    fn test_capacity_caps_assignment() {
        let catalog = BookCatalog::from_values([1, 2, 3, 4, 5, 6]);
        let library = Library::new(0, 2, 2).with_books(vec![0, 1, 2, 3, 4, 5]);
        let instance = Instance::new(4, catalog, vec![library]);
        let outcome = GreedyScheduler::new().schedule(&instance);

        // 2 scanning days × 2 books/day → top four books
        let a = &outcome.schedule.assignments[0];
        assert_eq!(a.books, vec![5, 4, 3, 2]);
        assert_eq!(outcome.decisions[0], (0, Decision::Committed { score: 18 }));
    }

    #[test]
    fn test_custom_rule() {
        // Projected score alone prefers the slow, rich library.
        let catalog = BookCatalog::from_values([100, 60]);
        let libraries = vec![
            Library::new(0, 1, 1).with_books(vec![1]),
            Library::new(1, 3, 1).with_books(vec![0]),
        ];
        let instance = Instance::new(10, catalog, libraries);

        let by_ratio = GreedyScheduler::new().schedule(&instance);
        assert_eq!(by_ratio.schedule.assignments[0].library_id, 0);

        let by_score = GreedyScheduler::new()
            .with_rule(ProjectedScore)
            .schedule(&instance);
        assert_eq!(by_score.schedule.assignments[0].library_id, 1);
    }

    #[test]
    fn test_empty_instance() {
        let instance = Instance::new(10, BookCatalog::default(), Vec::new());
        let outcome = GreedyScheduler::new().schedule(&instance);
        assert!(outcome.schedule.is_empty());
        assert!(outcome.decisions.is_empty());
    }

    #[test]
    fn test_random_instances_hold_invariants() {
        let mut rng = SmallRng::seed_from_u64(2020);
        for round in 0..200 {
            let generator = InstanceGenerator::new(60, 12, 15 + round % 10)
                .with_max_signup_days(4)
                .with_max_books_per_day(3)
                .with_max_books_per_library(15);
            let instance = generator.generate(&mut rng);
            let min_score = (round % 4) * 40;
            let policy = if round % 2 == 0 {
                ClaimPolicy::Retain
            } else {
                ClaimPolicy::Release
            };
            let outcome = GreedyScheduler::new()
                .with_min_score(min_score)
                .with_claim_policy(policy)
                .schedule(&instance);
            let schedule = &outcome.schedule;

            // Every library evaluated exactly once
            let evaluated: HashSet<_> = outcome.decisions.iter().map(|(id, _)| *id).collect();
            assert_eq!(evaluated.len(), instance.libraries.len());
            assert_eq!(outcome.decisions.len(), instance.libraries.len());

            let mut seen = HashSet::new();
            let mut expected_total = 0;
            let mut clock = 0;
            for a in &schedule.assignments {
                let lib = &instance.libraries[a.library_id];
                // Monotonic clock, signups back to back, before the deadline
                assert_eq!(a.signup_start_day, clock);
                clock += lib.signup_days;
                assert!(clock < instance.days);
                assert_eq!(a.scan_days, instance.days - clock);
                // Capacity bound and no empty activation
                assert!(!a.books.is_empty());
                assert!(a.books.len() as u64 <= a.capacity());
                // Threshold
                let score: u64 = a.books.iter().map(|&b| instance.catalog.value(b)).sum();
                assert!(score >= min_score);
                for &b in &a.books {
                    assert!(lib.books.contains(&b));
                    // Exactly-once credit
                    assert!(seen.insert(b), "book {b} assigned twice");
                    expected_total += instance.catalog.value(b);
                }
            }
            assert_eq!(schedule.elapsed_days, clock);
            assert!(schedule.elapsed_days <= instance.days);
            assert_eq!(tally(schedule, &instance.catalog), expected_total);
        }
    }
}
