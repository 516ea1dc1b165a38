//! Book (item) catalog.
//!
//! Books are stored once, indexed by id. Libraries and assignments refer
//! to them by [`BookId`]; the per-run "claimed" state lives in a separate
//! [`ClaimSet`] so the catalog itself stays immutable.

use serde::{Deserialize, Serialize};

/// Index of a book in its [`BookCatalog`].
pub type BookId = usize;

/// A scannable book with a fixed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Position in the catalog.
    pub id: BookId,
    /// Score credited when the book is scanned (at most once).
    pub value: u64,
}

/// Immutable list of books, indexed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCatalog {
    books: Vec<Book>,
}

impl BookCatalog {
    /// Builds a catalog from book values; ids are the value positions.
    pub fn from_values(values: impl IntoIterator<Item = u64>) -> Self {
        let books = values
            .into_iter()
            .enumerate()
            .map(|(id, value)| Book { id, value })
            .collect();
        Self { books }
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog holds no books.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Looks up a book.
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.get(id)
    }

    /// Whether `id` refers to a book in this catalog.
    #[inline]
    pub fn contains(&self, id: BookId) -> bool {
        id < self.books.len()
    }

    /// Value of a book, or 0 for an unknown id.
    #[inline]
    pub fn value(&self, id: BookId) -> u64 {
        self.books.get(id).map_or(0, |b| b.value)
    }

    /// Iterates over all books in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    /// Sum of all book values (upper bound on any schedule's score), or
    /// `None` if it does not fit in a `u64`.
    pub fn total_value(&self) -> Option<u64> {
        self.books
            .iter()
            .try_fold(0u64, |acc, b| acc.checked_add(b.value))
    }

    /// Stably sorts `ids` by descending book value.
    pub fn sort_by_value_desc(&self, ids: &mut [BookId]) {
        ids.sort_by(|&a, &b| self.value(b).cmp(&self.value(a)));
    }
}

/// Per-run record of which books have been claimed.
///
/// Mutated only by the scheduler; read by the capacity estimator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    claimed: Vec<bool>,
    count: usize,
}

impl ClaimSet {
    /// Creates an empty claim set sized for `book_count` books.
    pub fn new(book_count: usize) -> Self {
        Self {
            claimed: vec![false; book_count],
            count: 0,
        }
    }

    /// Whether the book has been claimed. Unknown ids are reported unclaimed.
    #[inline]
    pub fn is_claimed(&self, id: BookId) -> bool {
        self.claimed.get(id).copied().unwrap_or(false)
    }

    /// Marks a book claimed. Returns `false` if it was already claimed
    /// or the id is out of range.
    pub fn claim(&mut self, id: BookId) -> bool {
        match self.claimed.get_mut(id) {
            Some(slot) if !*slot => {
                *slot = true;
                self.count += 1;
                true
            }
            _ => false,
        }
    }

    /// Clears a claim. Returns `false` if the book was not claimed.
    pub fn release(&mut self, id: BookId) -> bool {
        match self.claimed.get_mut(id) {
            Some(slot) if *slot => {
                *slot = false;
                self.count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Number of claimed books.
    pub fn claimed_count(&self) -> usize {
        self.count
    }
}
