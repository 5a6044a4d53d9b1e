//! Analyze command - classify predictions and score each image.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};
use inspect_qa_adapters::FsPredictionSource;
use inspect_qa_core::{
    AnalysisRecord, Analyzer, ClassifierConfig, Clock, Inspection, InspectionDraft,
    InspectionStatus, PredictionSource, ProgressEvent, ProgressSink, ResultOutput, ScoringConfig,
    SystemClock, Verdict,
};
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Verdict when no defect and no strong positive result was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AmbiguousVerdict {
    /// Treat as passed
    Pass,
    /// Send to human review
    Review,
}

impl From<AmbiguousVerdict> for Verdict {
    fn from(v: AmbiguousVerdict) -> Self {
        match v {
            AmbiguousVerdict::Pass => Self::Pass,
            AmbiguousVerdict::Review => Self::Review,
        }
    }
}

/// Inspection status recorded for review verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReviewStatus {
    /// Keep the inspection pending
    Pending,
    /// Count the inspection as failed
    Failed,
}

impl From<ReviewStatus> for InspectionStatus {
    fn from(s: ReviewStatus) -> Self {
        match s {
            ReviewStatus::Pending => Self::Pending,
            ReviewStatus::Failed => Self::Failed,
        }
    }
}

/// Default inspector recorded on generated inspections.
const DEFAULT_INSPECTOR: &str = "inspect-qa";

/// Parse and validate a threshold value (0.0-1.0).
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Shared arguments for prediction analysis.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalyzeArgs {
    /// Prediction files (.json), images, or directories to analyze
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Inclusion threshold: predictions must be above this confidence (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Label substring marking a non-defect class (repeatable)
    #[arg(long = "hint", value_name = "LABEL")]
    pub hints: Vec<String>,

    /// Verdict when there are no defects and no confident "good" result
    #[arg(long, value_enum)]
    pub ambiguous: Option<AmbiguousVerdict>,

    /// Inspection status for review verdicts (with --as-inspections)
    #[arg(long, value_enum)]
    pub review_status: Option<ReviewStatus>,

    /// Emit inspection records instead of analysis records
    #[arg(long)]
    pub as_inspections: bool,

    /// Inspector recorded on generated inspections
    #[arg(long)]
    pub inspector: Option<String>,

    /// Batch number recorded on generated inspections
    #[arg(long)]
    pub batch: Option<String>,

    /// Station recorded on generated inspections
    #[arg(long)]
    pub location: Option<String>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (`ClassifierConfig`/`ScoringConfig` defaults)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        args.threshold = args.threshold.or(config.classifier.inclusion_threshold);
        if args.hints.is_empty() {
            if let Some(hints) = &config.classifier.non_defect_label_hints {
                args.hints.clone_from(hints);
            }
        }

        if args.ambiguous.is_none() {
            args.ambiguous = config
                .scoring
                .ambiguous_verdict
                .as_deref()
                .and_then(|s| AmbiguousVerdict::from_str(s, true).ok());
        }
        if args.review_status.is_none() {
            args.review_status = config
                .scoring
                .review_status
                .as_deref()
                .and_then(|s| ReviewStatus::from_str(s, true).ok());
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(|s| OutputFormat::from_str(s, true).ok());
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        // Keep the rest of the file for settings without a CLI flag
        args.config = Some(config.clone());

        args
    }

    /// Non-defect hints, if overridden by CLI or config.
    fn hints(&self) -> Option<Vec<String>> {
        (!self.hints.is_empty()).then(|| self.hints.clone())
    }

    /// Classifier settings with fallback to hardcoded defaults.
    fn classifier_config(&self) -> ClassifierConfig {
        let mut config = ClassifierConfig::default();
        if let Some(t) = self.threshold {
            config.inclusion_threshold = t;
        }
        if let Some(hints) = self.hints() {
            config.non_defect_label_hints = hints;
        }
        if let Some(section) = self.config.as_ref().map(|c| &c.classifier) {
            if let Some(t) = section.high_severity_threshold {
                config.high_severity_threshold = t;
            }
            if let Some(t) = section.medium_severity_threshold {
                config.medium_severity_threshold = t;
            }
        }
        config
    }

    /// Scoring settings with fallback to hardcoded defaults.
    fn scoring_config(&self) -> ScoringConfig {
        let mut config = ScoringConfig::default();
        if let Some(hints) = self.hints() {
            config.positive_label_hints = hints;
        }
        if let Some(v) = self.ambiguous {
            config.ambiguous_verdict = v.into();
        }
        if let Some(section) = self.config.as_ref().map(|c| &c.scoring) {
            if let Some(c) = section.positive_confidence {
                config.positive_confidence = c;
            }
            if let Some(s) = section.ambiguous_score {
                config.ambiguous_score = s.min(100);
            }
        }
        config
    }

    /// Status recorded for review verdicts, defaulting to pending.
    fn review_status(&self) -> InspectionStatus {
        self.review_status
            .map_or(InspectionStatus::Pending, Into::into)
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Descriptive fields for the inspection generated from `path`.
    fn draft(&self, path: &str, index: usize, now: OffsetDateTime) -> InspectionDraft {
        let product_name = Path::new(path)
            .file_stem()
            .map_or_else(|| path.to_string(), |s| s.to_string_lossy().into_owned());

        InspectionDraft {
            id: format!("INS-{:03}", index + 1),
            product_name,
            batch_number: self.batch.clone().unwrap_or_default(),
            inspector: self
                .inspector
                .clone()
                .unwrap_or_else(|| DEFAULT_INSPECTOR.to_string()),
            date: format_date(now),
            time: format_time(now),
            location: self.location.clone().unwrap_or_default(),
        }
    }
}

/// Result of running the analyze command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct AnalyzeResult {
    /// Number of prediction sets analyzed.
    pub processed: usize,
    /// Number of prediction sets skipped.
    pub skipped: usize,
    /// Number of sets with a fail or review verdict.
    pub flagged: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the analyze command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    info!("Running analyze command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let source = FsPredictionSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout();

    let analyzer = Analyzer::new(args.classifier_config(), args.scoring_config());
    debug!("Classifier: {:?}", analyzer.classifier().config());
    debug!("Scoring: {:?}", analyzer.policy().config());

    process_predictions(&source, &analyzer, &output, &progress_bar, args, &SystemClock)
}

/// Analyze every prediction set from `source`.
fn process_predictions(
    source: &dyn PredictionSource,
    analyzer: &Analyzer,
    output: &JsonOutput,
    progress: &dyn ProgressSink,
    args: &AnalyzeArgs,
    clock: &dyn Clock,
) -> Result<AnalyzeResult> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut flagged = 0usize;
    let mut records: Vec<AnalysisRecord> = Vec::new();
    let mut inspections: Vec<Inspection> = Vec::new();

    for (index, item) in source.prediction_sets().enumerate() {
        let set = match item {
            Ok(set) => set,
            Err(e) => {
                // The error context names the offending file
                warn!("{e:#}");
                progress.on_event(ProgressEvent::Skipped {
                    path: format!("input {index}"),
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: set.path.clone(),
            index,
            total,
        });

        let analysis = match analyzer.analyze(&set.predictions) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("Skipping {}: {e}", set.path);
                progress.on_event(ProgressEvent::Skipped {
                    path: set.path,
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        if analysis.verdict != Verdict::Pass {
            flagged += 1;
        }

        let now = clock.now();
        let record = AnalysisRecord::new(set.path.clone(), iso_timestamp(now), analysis.clone());

        progress.on_event(ProgressEvent::Completed {
            record: record.clone(),
        });

        if args.as_inspections {
            let draft = args.draft(&set.path, processed, now);
            let inspection = analysis.into_inspection(draft, args.review_status());
            match args.format() {
                OutputFormat::Jsonl => output.write_value(&inspection)?,
                OutputFormat::Json => inspections.push(inspection),
            }
        } else {
            match args.format() {
                OutputFormat::Jsonl => output.write(&record)?,
                OutputFormat::Json => records.push(record),
            }
        }

        processed += 1;
    }

    if args.format() == OutputFormat::Json {
        if args.as_inspections {
            output.write_array(&inspections, args.pretty)?;
        } else {
            output.write_array(&records, args.pretty)?;
        }
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if flagged > 0 {
        ExitCode::IssuesFound
    } else {
        ExitCode::Success
    };

    Ok(AnalyzeResult {
        processed,
        skipped,
        flagged,
        exit_code,
    })
}

/// Format a timestamp as ISO 8601 UTC (RFC 3339).
fn iso_timestamp(now: OffsetDateTime) -> String {
    match now.format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}

fn format_date(now: OffsetDateTime) -> String {
    now.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

fn format_time(now: OffsetDateTime) -> String {
    now.format(format_description!("[hour]:[minute]"))
        .unwrap_or_default()
}
