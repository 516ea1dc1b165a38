//! Book scanning domain models.
//!
//! Provides the data types for representing a signup-and-scan problem
//! and its solution.
//!
//! # Domain Mappings
//!
//! | u-scan | Generic scheduling | Logistics |
//! |--------|--------------------|-----------|
//! | Book | Item | Parcel |
//! | Library | Resource | Depot |
//! | Assignment | Committed activation | Route |
//! | Schedule | Solution | Dispatch plan |

mod instance;
mod item;
mod library;
mod schedule;

pub use instance::{Instance, InstanceGenerator};
pub use item::{Book, BookCatalog, BookId, ClaimSet};
pub use library::{Library, LibraryId};
pub use schedule::{Assignment, Schedule};
