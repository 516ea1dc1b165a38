//! Greedy library signup and book scanning scheduler.
//!
//! Given a day budget, a catalog of valued books and a pool of libraries
//! (each with a signup duration and a daily shipping throughput), picks a
//! signup order and a book assignment per library so that the total value
//! of distinct shipped books is high. Each book counts once.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Book`, `BookCatalog`, `ClaimSet`,
//!   `Library`, `Instance`, `Assignment`, `Schedule`
//! - **`scheduler`**: Capacity estimator, greedy loop, score accumulation
//! - **`validation`**: Input integrity checks
//! - **`io`**: Instance reader, submission reader and atomic writer
//! - **`config`**: TOML batch configuration
//! - **`report`**: Score formatting and progress reporting
//! - **`batch`**: Multi-dataset driver with per-dataset failure isolation
//!
//! # Example
//!
//! ```
//! use u_scan::io::parse_instance;
//! use u_scan::scheduler::{tally, GreedyScheduler};
//!
//! let instance = parse_instance("2 1 3\n10 20\n2 1 1\n0 1\n").unwrap();
//! let outcome = GreedyScheduler::new().schedule(&instance);
//! assert_eq!(tally(&outcome.schedule, &instance.catalog), 30);
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;

pub use error::{ScanError, ScanResult};
