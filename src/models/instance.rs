//! Problem instance: day budget, book catalog and library pool.

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{BookCatalog, Library};

/// A complete scheduling problem.
///
/// Each run owns its own instance; nothing is shared between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Total day budget (deadline).
    pub days: u64,
    /// All books.
    pub catalog: BookCatalog,
    /// Candidate libraries, in input order.
    pub libraries: Vec<Library>,
}

impl Instance {
    /// Creates an instance, sorting every library's books by descending value.
    pub fn new(days: u64, catalog: BookCatalog, libraries: Vec<Library>) -> Self {
        let libraries = libraries
            .into_iter()
            .map(|lib| lib.sorted_by(&catalog))
            .collect();
        Self {
            days,
            catalog,
            libraries,
        }
    }

    /// Number of libraries.
    pub fn library_count(&self) -> usize {
        self.libraries.len()
    }
}

/// Random instance generator, for stress and property testing.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_scan::models::InstanceGenerator;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let instance = InstanceGenerator::new(50, 8, 20).generate(&mut rng);
/// assert_eq!(instance.catalog.len(), 50);
/// assert_eq!(instance.libraries.len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    /// Number of books.
    pub books: usize,
    /// Number of libraries.
    pub libraries: usize,
    /// Day budget.
    pub days: u64,
    /// Book values are drawn from `0..=max_value`.
    pub max_value: u64,
    /// Signup days are drawn from `1..=max_signup_days`.
    pub max_signup_days: u64,
    /// Throughput is drawn from `1..=max_books_per_day`.
    pub max_books_per_day: u64,
    /// Each library lists between 1 and this many distinct books.
    pub max_books_per_library: usize,
}

impl InstanceGenerator {
    /// Creates a generator with moderate defaults for the remaining knobs.
    pub fn new(books: usize, libraries: usize, days: u64) -> Self {
        Self {
            books,
            libraries,
            days,
            max_value: 100,
            max_signup_days: 5,
            max_books_per_day: 3,
            max_books_per_library: 10,
        }
    }

    /// Sets the maximum book value.
    pub fn with_max_value(mut self, max_value: u64) -> Self {
        self.max_value = max_value;
        self
    }

    /// Sets the maximum signup duration.
    pub fn with_max_signup_days(mut self, days: u64) -> Self {
        self.max_signup_days = days.max(1);
        self
    }

    /// Sets the maximum throughput.
    pub fn with_max_books_per_day(mut self, books: u64) -> Self {
        self.max_books_per_day = books.max(1);
        self
    }

    /// Sets the maximum library size.
    pub fn with_max_books_per_library(mut self, books: usize) -> Self {
        self.max_books_per_library = books.max(1);
        self
    }

    /// Draws a random instance.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Instance {
        let catalog =
            BookCatalog::from_values((0..self.books).map(|_| rng.random_range(0..=self.max_value)));

        let libraries = (0..self.libraries)
            .map(|id| {
                let amount = if self.books == 0 {
                    0
                } else {
                    rng.random_range(1..=self.max_books_per_library.min(self.books))
                };
                let books = index::sample(rng, self.books, amount).into_vec();
                Library::new(
                    id,
                    rng.random_range(1..=self.max_signup_days),
                    rng.random_range(1..=self.max_books_per_day),
                )
                .with_books(books)
            })
            .collect();

        Instance::new(self.days, catalog, libraries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_sorts_books() {
        let catalog = BookCatalog::from_values([1, 9, 5]);
        let lib = Library::new(0, 1, 1).with_books(vec![0, 1, 2]);
        let instance = Instance::new(10, catalog, vec![lib]);
        assert_eq!(instance.libraries[0].books, vec![1, 2, 0]);
        assert_eq!(instance.library_count(), 1);
    }

    #[test]
    fn test_generator_shape() {
        let mut rng = SmallRng::seed_from_u64(42);
        let generator = InstanceGenerator::new(30, 6, 12)
            .with_max_value(50)
            .with_max_signup_days(4)
            .with_max_books_per_day(2)
            .with_max_books_per_library(7);
        let instance = generator.generate(&mut rng);

        assert_eq!(instance.days, 12);
        assert_eq!(instance.catalog.len(), 30);
        assert_eq!(instance.libraries.len(), 6);
        for lib in &instance.libraries {
            assert!((1..=4).contains(&lib.signup_days));
            assert!((1..=2).contains(&lib.books_per_day));
            assert!(!lib.books.is_empty() && lib.books.len() <= 7);
            assert!(lib.books.iter().all(|&b| instance.catalog.contains(b)));
            assert!(lib.is_sorted_by_value(&instance.catalog));
        }
        assert!(instance.catalog.iter().all(|b| b.value <= 50));
    }

    #[test]
    fn test_generator_deterministic() {
        let generator = InstanceGenerator::new(20, 4, 10);
        let a = generator.generate(&mut SmallRng::seed_from_u64(1));
        let b = generator.generate(&mut SmallRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generator_no_books() {
        let mut rng = SmallRng::seed_from_u64(3);
        let instance = InstanceGenerator::new(0, 3, 5).generate(&mut rng);
        assert!(instance.libraries.iter().all(|l| l.books.is_empty()));
    }
}
