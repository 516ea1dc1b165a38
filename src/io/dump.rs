//! Submission writer.
//!
//! Writes a schedule in the submission format (see [`super::parser`]) to
//! `<dir>/<dataset>-<YYYYMMDDTHHMMSS>.result`. The file is written to a
//! temporary sibling and moved into place, so readers never see a partial
//! artifact. A name collision within the same second gets a `-N` suffix.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{BookCatalog, Schedule};
use crate::scheduler::tally;

const MAX_NAME_ATTEMPTS: usize = 100;

/// Errors raised while persisting a submission.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("cannot create result directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no free artifact name for {dataset} in {}", dir.display())]
    NameExhausted { dataset: String, dir: PathBuf },
}

/// A persisted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpReport {
    /// Final artifact path.
    pub path: PathBuf,
    /// Deduplicated score of the written schedule.
    pub score: u64,
}

/// Renders a schedule in the submission format.
pub fn render_submission(schedule: &Schedule) -> String {
    let mut out = format!("{}\n", schedule.assignment_count());
    for a in &schedule.assignments {
        out.push_str(&format!("{} {}\n", a.library_id, a.books.len()));
        let ids: Vec<String> = a.books.iter().map(ToString::to_string).collect();
        out.push_str(&ids.join(" "));
        out.push('\n');
    }
    out
}

fn artifact_name(dataset: &str, stamp: &str, attempt: usize) -> String {
    if attempt == 0 {
        format!("{dataset}-{stamp}.result")
    } else {
        format!("{dataset}-{stamp}-{attempt}.result")
    }
}

/// Writes a schedule atomically under `dir` and returns where it landed.
pub fn write_submission(
    schedule: &Schedule,
    catalog: &BookCatalog,
    dir: &Path,
    dataset: &str,
) -> Result<DumpReport, DumpError> {
    std::fs::create_dir_all(dir).map_err(|source| DumpError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_err = |source| DumpError::Write {
        path: dir.to_path_buf(),
        source,
    };
    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(render_submission(schedule).as_bytes())
        .map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;

    // Keep only the file name so dataset paths cannot escape `dir`
    let dataset = Path::new(dataset)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(dataset);
    let stamp = Local::now().format("%Y%m%dT%H%M%S").to_string();

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(artifact_name(dataset, &stamp, attempt));
        match file.persist_noclobber(&path) {
            Ok(_) => {
                let score = tally(schedule, catalog);
                info!(path = %path.display(), score, "submission written");
                return Ok(DumpReport { path, score });
            }
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "artifact name taken");
                file = e.file;
            }
            Err(e) => {
                return Err(DumpError::Write {
                    path,
                    source: e.error,
                })
            }
        }
    }

    Err(DumpError::NameExhausted {
        dataset: dataset.to_string(),
        dir: dir.to_path_buf(),
    })
}
