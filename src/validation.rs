//! Input validation for scan instances.
//!
//! Checks structural integrity of libraries before scheduling. Detects:
//! - Duplicate library IDs
//! - Zero signup duration or zero throughput
//! - Book references outside the catalog
//! - Books listed twice by the same library
//! - Book lists not sorted by descending value
//! - Book values whose sum overflows a score

use std::collections::HashSet;
use std::fmt;

use crate::models::Instance;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two libraries share the same ID.
    DuplicateId,
    /// A library needs zero days to sign up.
    ZeroSignup,
    /// A library ships zero books per day.
    ZeroThroughput,
    /// A library lists a book that doesn't exist.
    UnknownBook,
    /// A library lists the same book more than once.
    DuplicateBook,
    /// A library's books are not in descending value order.
    UnsortedBooks,
    /// The catalog's values sum past `u64::MAX`.
    ValueOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates an instance.
///
/// Checks:
/// 1. No duplicate library IDs
/// 2. Every library has positive signup days and throughput
/// 3. Every listed book exists in the catalog
/// 4. No library lists a book twice
/// 5. Every library's books are sorted by descending value
/// 6. The catalog's total value fits in a `u64`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();
    let catalog = &instance.catalog;

    if catalog.total_value().is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::ValueOverflow,
            format!("Book values of {} books overflow a u64 score", catalog.len()),
        ));
    }

    let mut library_ids = HashSet::new();
    for lib in &instance.libraries {
        if !library_ids.insert(lib.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate library ID: {}", lib.id),
            ));
        }

        if lib.signup_days == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroSignup,
                format!("Library {} has zero signup days", lib.id),
            ));
        }

        if lib.books_per_day == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroThroughput,
                format!("Library {} ships zero books per day", lib.id),
            ));
        }

        let mut listed = HashSet::new();
        for &book in &lib.books {
            if !catalog.contains(book) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownBook,
                    format!("Library {} references unknown book {}", lib.id, book),
                ));
            }
            if !listed.insert(book) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateBook,
                    format!("Library {} lists book {} more than once", lib.id, book),
                ));
            }
        }

        if !lib.is_sorted_by_value(catalog) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnsortedBooks,
                format!("Library {} books are not sorted by descending value", lib.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
