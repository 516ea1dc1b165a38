//! Capacity estimator.
//!
//! Projects the score a book list can earn in a given number of scanning
//! days. Books are consumed in list order (highest value first); each one
//! taken uses a unit of capacity.
//!
//! # Claim handling
//!
//! | `skip_claimed` | claimed book |
//! |----------------|--------------|
//! | `true` | skipped: no capacity used, no value |
//! | `false` | taken like any other book |
//!
//! The ranking pass uses `true`. The post-commit projection uses `false`
//! over books the commit has just claimed, so it re-scores them verbatim.

use crate::models::{BookCatalog, BookId, ClaimSet};

/// Best score reachable by shipping `books` for `day_budget` days at
/// `books_per_day`. Pure; never touches `claims`. Saturates at `u64::MAX`.
///
/// # Complexity
/// O(min(n, capacity + claimed)) where n = `books.len()`.
pub fn estimate(
    books: &[BookId],
    books_per_day: u64,
    day_budget: u64,
    skip_claimed: bool,
    catalog: &BookCatalog,
    claims: &ClaimSet,
) -> u64 {
    let capacity = day_budget.saturating_mul(books_per_day);
    if capacity == 0 {
        return 0;
    }

    let mut taken: u64 = 0;
    let mut score: u64 = 0;
    for &book in books {
        if taken >= capacity {
            break;
        }
        if skip_claimed && claims.is_claimed(book) {
            continue;
        }
        score = score.saturating_add(catalog.value(book));
        taken += 1;
    }
    score
}

/// Remaining scanning days if signup of `signup_days` starts at `elapsed`.
/// Saturates at zero when the signup cannot finish before `total_days`.
#[inline]
pub fn day_budget(total_days: u64, signup_days: u64, elapsed: u64) -> u64 {
    total_days
        .saturating_sub(signup_days)
        .saturating_sub(elapsed)
}
