//! Classification and aggregation engine.
//!
//! Leaves first: `DefectClassifier` and `TrendWindow` have no dependencies,
//! `ScoringPolicy` consumes classifier output, `MetricsAggregator` owns the
//! inspection collection and a trend window.

mod aggregator;
mod analyzer;
mod classifier;
mod scoring;
mod trend;

pub use aggregator::{MetricsAggregator, RecomputeMode};
pub use analyzer::Analyzer;
pub use classifier::{ClassifierConfig, DefectClassifier, DEFAULT_NON_DEFECT_HINTS};
pub use scoring::{ScoringConfig, ScoringPolicy};
pub use trend::{TrendWindow, TREND_WINDOW_LEN};
