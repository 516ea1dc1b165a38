//! Console reporting.
//!
//! Score formatting and progress output live here so the scheduler never
//! prints. `Score` groups digits in threes with commas.

use std::fmt;

/// A score, displayed with thousands separators (`5,237,345`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(pub u64);

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        f.pad(&grouped)
    }
}

/// Receives batch progress.
pub trait Reporter {
    /// A dataset finished with the given score.
    fn dataset_scored(&mut self, dataset: &str, score: u64);

    /// A dataset could not be run.
    fn dataset_failed(&mut self, dataset: &str, error: &dyn std::error::Error);

    /// The batch finished.
    fn finished(&mut self, total: u64, failed: usize);
}

/// Prints progress to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn dataset_scored(&mut self, dataset: &str, score: u64) {
        println!("{dataset:<32} {:>14}", Score(score));
    }

    fn dataset_failed(&mut self, dataset: &str, error: &dyn std::error::Error) {
        println!("{dataset:<32} {:>14}  ({error})", "FAILED");
    }

    fn finished(&mut self, total: u64, failed: usize) {
        println!("{:<32} {:>14}", "Total", Score(total));
        if failed > 0 {
            println!("{failed} dataset(s) failed");
        }
    }
}

/// Event recorded by [`CollectingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// See [`Reporter::dataset_scored`].
    Scored { dataset: String, score: u64 },
    /// See [`Reporter::dataset_failed`].
    Failed { dataset: String, error: String },
    /// See [`Reporter::finished`].
    Finished { total: u64, failed: usize },
}

/// Records events in memory.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    /// Events in arrival order.
    pub events: Vec<ReportEvent>,
}

impl Reporter for CollectingReporter {
    fn dataset_scored(&mut self, dataset: &str, score: u64) {
        self.events.push(ReportEvent::Scored {
            dataset: dataset.to_string(),
            score,
        });
    }

    fn dataset_failed(&mut self, dataset: &str, error: &dyn std::error::Error) {
        self.events.push(ReportEvent::Failed {
            dataset: dataset.to_string(),
            error: error.to_string(),
        });
    }

    fn finished(&mut self, total: u64, failed: usize) {
        self.events.push(ReportEvent::Finished { total, failed });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_grouping() {
        assert_eq!(Score(0).to_string(), "0");
        assert_eq!(Score(999).to_string(), "999");
        assert_eq!(Score(1000).to_string(), "1,000");
        assert_eq!(Score(21).to_string(), "21");
        assert_eq!(Score(5_237_345).to_string(), "5,237,345");
        assert_eq!(Score(100_000).to_string(), "100,000");
        assert_eq!(Score(u64::MAX).to_string(), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_score_padding() {
        assert_eq!(format!("{:>8}", Score(1234)), "   1,234");
    }

    #[test]
    fn test_collecting_reporter() {
        let mut r = CollectingReporter::default();
        r.dataset_scored("a", 21);
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        r.dataset_failed("b", &err);
        r.finished(21, 1);
        assert_eq!(
            r.events,
            vec![
                ReportEvent::Scored {
                    dataset: "a".into(),
                    score: 21
                },
                ReportEvent::Failed {
                    dataset: "b".into(),
                    error: "gone".into()
                },
                ReportEvent::Finished {
                    total: 21,
                    failed: 1
                },
            ]
        );
    }
}
