use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use u_scan::batch::{solve_file, BatchRunner};
use u_scan::config::BatchConfig;
use u_scan::io::{read_instance, read_submission};
use u_scan::report::{CollectingReporter, ConsoleReporter, Score};
use u_scan::scheduler::{ClaimPolicy, ScoreSummary};

#[derive(Parser)]
#[command(
    name = "u-scan",
    about = "Greedy library signup and book scanning scheduler",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every configured dataset and report the grand total
    Batch {
        /// TOML configuration (default: built-in dataset table)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// Write a submission file per dataset
        #[arg(short, long)]
        write: bool,
        /// Print the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Schedule a single instance file
    Solve {
        /// Instance file
        path: PathBuf,
        /// Minimum score an activation must reach
        #[arg(short, long, default_value_t = 0)]
        min_score: u64,
        /// Write the submission into this directory
        #[arg(short, long)]
        dump: Option<PathBuf>,
        /// Release books claimed by rejected activations
        #[arg(long)]
        release_claims: bool,
    },
    /// Re-score an existing submission against its instance
    Score {
        /// Instance file
        instance: PathBuf,
        /// Submission file
        submission: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("u_scan=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Batch {
            config,
            data_dir,
            write,
            json,
        } => {
            let mut config = match config {
                Some(path) => BatchConfig::from_file(&path)?,
                None => BatchConfig::default(),
            };
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            config.write_results |= write;

            let runner = BatchRunner::new(config);
            let summary = if json {
                let summary = runner.run_all(&mut CollectingReporter::default());
                println!("{}", serde_json::to_string_pretty(&summary)?);
                summary
            } else {
                runner.run_all(&mut ConsoleReporter)
            };
            if !summary.is_success() {
                anyhow::bail!("{} dataset(s) failed", summary.failures.len());
            }
            Ok(())
        }
        Commands::Solve {
            path,
            min_score,
            dump,
            release_claims,
        } => {
            let mut config = BatchConfig::default();
            if let Some(dir) = dump {
                config.result_dir = dir;
                config.write_results = true;
            }
            if release_claims {
                config.claim_policy = ClaimPolicy::Release;
            }
            let report = solve_file(&path, min_score, &config)
                .with_context(|| format!("solving {}", path.display()))?;
            println!(
                "{}: {} ({} libraries, {} rejected)",
                report.dataset,
                Score(report.summary.total_score),
                report.summary.libraries,
                report.rejected
            );
            if let Some(artifact) = report.artifact {
                println!("written to {artifact}");
            }
            Ok(())
        }
        Commands::Score {
            instance,
            submission,
        } => {
            let instance = read_instance(&instance)?;
            let schedule = read_submission(&submission)?;
            let summary = ScoreSummary::calculate(&schedule, &instance.catalog);
            println!(
                "Result : {} ({} books, {} duplicates)",
                Score(summary.total_score),
                summary.distinct_books,
                summary.duplicate_books
            );
            Ok(())
        }
    }
}
