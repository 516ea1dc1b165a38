//! Batch configuration (`u-scan.toml`).
//!
//! ```toml
//! data_dir = "data"
//! result_dir = "result"
//! write_results = true
//! claim_policy = "retain"
//!
//! [[datasets]]
//! name = "a_example.txt"
//! min_score = 1
//! ```
//!
//! Every key is optional; a missing `datasets` table falls back to the six
//! standard qualification datasets and their thresholds.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ScanResult;
use crate::scheduler::ClaimPolicy;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// One dataset to run and the score an activation must reach in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// File name under `data_dir`.
    pub name: String,
    /// Minimum activation score.
    #[serde(default)]
    pub min_score: u64,
}

impl DatasetConfig {
    /// Creates a dataset entry.
    pub fn new(name: impl Into<String>, min_score: u64) -> Self {
        Self {
            name: name.into(),
            min_score,
        }
    }
}

/// Batch run settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory holding instance files.
    pub data_dir: PathBuf,
    /// Directory receiving submission files.
    pub result_dir: PathBuf,
    /// Whether to write a submission per dataset.
    pub write_results: bool,
    /// Claim handling for rejected activations.
    pub claim_policy: ClaimPolicy,
    /// Datasets in run order.
    pub datasets: Vec<DatasetConfig>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            result_dir: PathBuf::from("result"),
            write_results: false,
            claim_policy: ClaimPolicy::Retain,
            datasets: default_datasets(),
        }
    }
}

/// The six qualification datasets with their tuned thresholds.
pub fn default_datasets() -> Vec<DatasetConfig> {
    vec![
        DatasetConfig::new("a_example.txt", 1),
        DatasetConfig::new("b_read_on.txt", 10),
        DatasetConfig::new("c_incunabula.txt", 100),
        DatasetConfig::new("d_tough_choices.txt", 130),
        DatasetConfig::new("e_so_many_books.txt", 1000),
        DatasetConfig::new("f_libraries_of_the_world.txt", 280_000),
    ]
}

impl BatchConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads configuration from a file.
    pub fn from_file(path: &Path) -> ScanResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Full path of a dataset file.
    pub fn dataset_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}
