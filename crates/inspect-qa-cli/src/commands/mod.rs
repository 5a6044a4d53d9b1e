//! CLI command definitions and handlers.

pub mod analyze;
pub mod metrics;

use clap::{Parser, Subcommand};

/// Inspect QA - Defect classification and quality metrics
#[derive(Parser)]
#[command(name = "inspect-qa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared analyze arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub analyze: analyze::AnalyzeArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Classify predictions and score each image
    Analyze(analyze::AnalyzeArgs),
    /// Aggregate inspection records into quality metrics
    Metrics(metrics::MetricsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every analyzed image passed.
    Success = 0,
    /// At least one image failed or needs review.
    IssuesFound = 1,
    /// Invalid input or runtime failure.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
