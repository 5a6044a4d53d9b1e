//! Metrics command - fold inspection records into quality metrics.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use inspect_qa_adapters::{load_inspections, load_seed};
use inspect_qa_core::domain::MONTH_LABELS;
use inspect_qa_core::ports::NoopScheduler;
use inspect_qa_core::{
    Clock, MetricsAggregator, QualityMetrics, RecomputeScheduler, ResultOutput, SystemClock,
};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::output::JsonOutput;

/// Parse a month label ("Jan".."Dec", case-insensitive).
fn parse_month(s: &str) -> Result<&'static str, String> {
    MONTH_LABELS
        .iter()
        .copied()
        .find(|m| m.eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("'{s}' is not a month label (Jan..Dec)"))
}

/// Arguments for the metrics command.
#[derive(Args, Clone)]
pub struct MetricsArgs {
    /// Inspection files (JSON array or JSON Lines)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Seed metrics shown while no inspection is recorded (JSON)
    #[arg(long, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Month label for the current trend point (default: current month)
    #[arg(long, value_parser = parse_month)]
    pub month: Option<&'static str>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// System clock reporting a fixed month label.
struct MonthClock(&'static str);

impl Clock for MonthClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn current_month(&self) -> &'static str {
        self.0
    }
}

/// Run the metrics command.
pub fn run(args: &MetricsArgs) -> Result<()> {
    let metrics = aggregate(args, Arc::new(NoopScheduler))?;

    let output = JsonOutput::stdout();
    output.write_document(metrics.as_ref(), args.pretty)?;
    output.flush()
}

/// Load every inspection file and return the flushed metrics.
///
/// Inspections whose id was already recorded are skipped with a warning.
fn aggregate(
    args: &MetricsArgs,
    scheduler: Arc<dyn RecomputeScheduler>,
) -> Result<Arc<QualityMetrics>> {
    let seed = match &args.seed {
        Some(path) => load_seed(path)?,
        None => QualityMetrics::seeded(),
    };
    let clock: Arc<dyn Clock> = match args.month {
        Some(month) => Arc::new(MonthClock(month)),
        None => Arc::new(SystemClock),
    };

    let mut aggregator = MetricsAggregator::with_clock(seed, clock).deferred(scheduler);

    for file in &args.files {
        for inspection in load_inspections(file)? {
            if let Err(e) = aggregator.add(inspection) {
                warn!("{e} ({}), skipping", file.display());
            }
        }
    }

    aggregator.flush();
    info!(
        "Aggregated {} inspections (generation {})",
        aggregator.len(),
        aggregator.generation()
    );

    Ok(aggregator.metrics())
}
