//! Schedule (solution) model.
//!
//! A schedule is the ordered list of committed library activations, each
//! with the books it was assigned. Order is signup order.

use serde::{Deserialize, Serialize};

use super::{BookId, LibraryId};

/// A committed library activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Activated library.
    pub library_id: LibraryId,
    /// Books assigned to this library, in shipping order.
    pub books: Vec<BookId>,
    /// Day on which signup started.
    pub signup_start_day: u64,
    /// Days left for scanning once signup finished.
    pub scan_days: u64,
    /// Library throughput, copied for capacity checks.
    pub books_per_day: u64,
}

impl Assignment {
    /// Creates an assignment with no books.
    pub fn new(library_id: LibraryId, signup_start_day: u64, scan_days: u64) -> Self {
        Self {
            library_id,
            books: Vec::new(),
            signup_start_day,
            scan_days,
            books_per_day: 0,
        }
    }

    /// Sets the assigned books.
    pub fn with_books(mut self, books: Vec<BookId>) -> Self {
        self.books = books;
        self
    }

    /// Sets the throughput.
    pub fn with_books_per_day(mut self, books_per_day: u64) -> Self {
        self.books_per_day = books_per_day;
        self
    }

    /// Books this activation could ship in its scanning window.
    #[inline]
    pub fn capacity(&self) -> u64 {
        self.scan_days.saturating_mul(self.books_per_day)
    }
}

/// A complete schedule for one instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Committed activations in signup order.
    pub assignments: Vec<Assignment>,
    /// Days consumed by signups of committed libraries.
    pub elapsed_days: u64,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a committed activation.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Number of committed libraries.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether nothing was committed.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Finds the activation of a library.
    pub fn assignment_for_library(&self, library_id: LibraryId) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.library_id == library_id)
    }

    /// Total books shipped (counting duplicates, if any).
    pub fn shipped_book_count(&self) -> usize {
        self.assignments.iter().map(|a| a.books.len()).sum()
    }
}
