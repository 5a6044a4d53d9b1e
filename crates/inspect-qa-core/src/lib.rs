//! Inspect QA Core - Domain logic and engine
//!
//! This crate contains the domain types, port traits, and the engine that turns
//! classifier output into scored defect records and folds inspections into
//! rolling quality metrics.

pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;

pub use domain::{
    Analysis, AnalysisRecord, Defect, DefectCategory, DefectTypeShare, Evaluation, Inspection,
    InspectionDraft, InspectionStatus, InspectionUpdate, MonthlyTrendPoint, PredictionSet,
    QualityMetrics, RawPrediction, Severity, Verdict,
};
pub use engine::{
    Analyzer, ClassifierConfig, DefectClassifier, MetricsAggregator, RecomputeMode, ScoringConfig,
    ScoringPolicy, TrendWindow,
};
pub use error::EngineError;
pub use ports::{
    ClassifierOracle, Clock, PredictionSource, ProgressEvent, ProgressSink, RecomputeScheduler,
    ResultOutput, SystemClock,
};
