//! Score accumulation and schedule metrics.
//!
//! Every book is credited once, the first time it appears in commitment
//! order, no matter how many activations list it. The scheduler already
//! assigns each book at most once; deduplicating here keeps the tally
//! correct for schedules assembled by other means (e.g. read back from disk).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total score | Sum of values of distinct shipped books |
//! | Distinct books | Number of distinct shipped books |
//! | Duplicate books | Shipments of a book already credited |
//! | Coverage | Total score / catalog value |
//! | Days used | Signup days consumed |

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{BookCatalog, Schedule};

/// Total score of a schedule, crediting each distinct book once.
///
/// Never touches claim state; the "already counted" set is local to the call.
pub fn tally(schedule: &Schedule, catalog: &BookCatalog) -> u64 {
    let mut counted = HashSet::new();
    schedule
        .assignments
        .iter()
        .flat_map(|a| a.books.iter().copied())
        .filter(|&book| counted.insert(book))
        .map(|book| catalog.value(book))
        .fold(0, u64::saturating_add)
}

/// Schedule quality summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Deduplicated total score.
    pub total_score: u64,
    /// Number of activated libraries.
    pub libraries: usize,
    /// Number of distinct shipped books.
    pub distinct_books: usize,
    /// Shipments of an already credited book.
    pub duplicate_books: usize,
    /// Fraction of the catalog's total value captured (0.0..=1.0).
    pub coverage: f64,
    /// Signup days consumed.
    pub days_used: u64,
}

impl ScoreSummary {
    /// Computes the summary of a schedule against its catalog.
    pub fn calculate(schedule: &Schedule, catalog: &BookCatalog) -> Self {
        let mut counted = HashSet::new();
        let mut total_score: u64 = 0;
        let mut duplicate_books = 0;

        for book in schedule.assignments.iter().flat_map(|a| a.books.iter()) {
            if counted.insert(*book) {
                total_score = total_score.saturating_add(catalog.value(*book));
            } else {
                duplicate_books += 1;
            }
        }

        let coverage = match catalog.total_value() {
            Some(value) if value > 0 => total_score as f64 / value as f64,
            _ => 0.0,
        };

        Self {
            total_score,
            libraries: schedule.assignment_count(),
            distinct_books: counted.len(),
            duplicate_books,
            coverage,
            days_used: schedule.elapsed_days,
        }
    }
}
