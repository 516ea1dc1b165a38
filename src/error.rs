//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::io::{DumpError, ParseError};
use crate::validation::ValidationError;

/// Errors that can occur while running a dataset end to end.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid instance: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),

    #[error("dump error: {0}")]
    Dump(#[from] DumpError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

pub type ScanResult<T> = Result<T, ScanError>;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for ScanError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ScanError::Invalid(errors)
    }
}
