//! Library (resource) model.
//!
//! A library must spend `signup_days` activating before it can ship books,
//! then ships up to `books_per_day` books per remaining day. Its book list
//! is kept sorted by descending value so that capacity is always spent on
//! the most valuable books first.

use serde::{Deserialize, Serialize};

use super::{BookCatalog, BookId};

/// Index of a library in its instance.
pub type LibraryId = usize;

/// An activatable library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// Position in the input.
    pub id: LibraryId,
    /// Eligible books, sorted descending by value once built through
    /// [`Library::sorted_by`].
    pub books: Vec<BookId>,
    /// Days needed to activate (must be positive).
    pub signup_days: u64,
    /// Books shipped per day once active (must be positive).
    pub books_per_day: u64,
}

impl Library {
    /// Creates a library with no books.
    pub fn new(id: LibraryId, signup_days: u64, books_per_day: u64) -> Self {
        Self {
            id,
            books: Vec::new(),
            signup_days,
            books_per_day,
        }
    }

    /// Sets the eligible books (input order).
    pub fn with_books(mut self, books: Vec<BookId>) -> Self {
        self.books = books;
        self
    }

    /// Sorts the eligible books by descending value (stable).
    pub fn sorted_by(mut self, catalog: &BookCatalog) -> Self {
        catalog.sort_by_value_desc(&mut self.books);
        self
    }

    /// Books that fit in `days` days of scanning.
    #[inline]
    pub fn capacity(&self, days: u64) -> u64 {
        days.saturating_mul(self.books_per_day)
    }

    /// Whether the book list is ordered by descending value.
    pub fn is_sorted_by_value(&self, catalog: &BookCatalog) -> bool {
        self.books
            .windows(2)
            .all(|w| catalog.value(w[0]) >= catalog.value(w[1]))
    }
}
