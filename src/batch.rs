//! Batch driver.
//!
//! Runs the scheduler once per configured dataset, each with its own
//! threshold and its own freshly parsed instance. A dataset that fails to
//! load, validate or persist is reported and skipped; the others still run.

use std::path::Path;

use serde::Serialize;
use tracing::{error, info, info_span};

use crate::config::BatchConfig;
use crate::error::ScanResult;
use crate::io::{read_instance, write_submission};
use crate::models::Instance;
use crate::report::Reporter;
use crate::scheduler::{GreedyScheduler, ScoreSummary};
use crate::validation::validate_instance;

/// Result of one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    /// Dataset name.
    pub dataset: String,
    /// Threshold used.
    pub min_score: u64,
    /// Score metrics.
    pub summary: ScoreSummary,
    /// Libraries evaluated but not activated.
    pub rejected: usize,
    /// Submission file, when written.
    pub artifact: Option<String>,
}

/// A dataset that could not be run.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetFailure {
    /// Dataset name.
    pub dataset: String,
    /// Error description.
    pub error: String,
}

/// Result of a whole batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Successful datasets in run order.
    pub reports: Vec<DatasetReport>,
    /// Failed datasets in run order.
    pub failures: Vec<DatasetFailure>,
    /// Sum of successful scores.
    pub total: u64,
}

impl BatchSummary {
    /// Whether every dataset succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs configured datasets.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    /// Creates a runner.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    fn scheduler(&self, min_score: u64) -> GreedyScheduler {
        GreedyScheduler::new()
            .with_min_score(min_score)
            .with_claim_policy(self.config.claim_policy)
    }

    /// Schedules an already loaded instance and optionally persists it.
    pub fn run_instance(
        &self,
        dataset: &str,
        instance: &Instance,
        min_score: u64,
    ) -> ScanResult<DatasetReport> {
        validate_instance(instance)?;

        let outcome = self.scheduler(min_score).schedule(instance);
        let rejected = outcome.rejected_count();
        let schedule = outcome.schedule;
        let summary = ScoreSummary::calculate(&schedule, &instance.catalog);

        let artifact = if self.config.write_results {
            let dump = write_submission(
                &schedule,
                &instance.catalog,
                &self.config.result_dir,
                dataset,
            )?;
            Some(dump.path.display().to_string())
        } else {
            None
        };

        Ok(DatasetReport {
            dataset: dataset.to_string(),
            min_score,
            summary,
            rejected,
            artifact,
        })
    }

    /// Loads, validates and schedules one dataset file from `data_dir`.
    pub fn run_dataset(&self, dataset: &str, min_score: u64) -> ScanResult<DatasetReport> {
        let span = info_span!("dataset", name = dataset, min_score);
        let _guard = span.enter();

        let path = self.config.dataset_path(dataset);
        let instance = read_instance(&path)?;
        info!(
            books = instance.catalog.len(),
            libraries = instance.library_count(),
            days = instance.days,
            "instance loaded"
        );
        self.run_instance(dataset, &instance, min_score)
    }

    /// Scheduler score for one dataset.
    pub fn run(&self, dataset: &str, min_score: u64) -> ScanResult<u64> {
        Ok(self.run_dataset(dataset, min_score)?.summary.total_score)
    }

    /// Runs every configured dataset, isolating failures.
    pub fn run_all(&self, reporter: &mut dyn Reporter) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for entry in &self.config.datasets {
            match self.run_dataset(&entry.name, entry.min_score) {
                Ok(report) => {
                    let score = report.summary.total_score;
                    info!(dataset = %entry.name, score, "dataset scored");
                    reporter.dataset_scored(&entry.name, score);
                    summary.total = summary.total.saturating_add(score);
                    summary.reports.push(report);
                }
                Err(e) => {
                    error!(dataset = %entry.name, error = %e, "dataset failed");
                    reporter.dataset_failed(&entry.name, &e);
                    summary.failures.push(DatasetFailure {
                        dataset: entry.name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        reporter.finished(summary.total, summary.failures.len());
        summary
    }
}

/// Runs a single instance file with a standalone configuration.
pub fn solve_file(
    path: &Path,
    min_score: u64,
    config: &BatchConfig,
) -> ScanResult<DatasetReport> {
    let instance = read_instance(path)?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("instance");
    BatchRunner::new(config.clone()).run_instance(name, &instance, min_score)
}
