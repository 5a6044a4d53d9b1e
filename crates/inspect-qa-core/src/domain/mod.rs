//! Core domain types for defect classification and quality metrics.

mod analysis;
mod defect;
mod inspection;
mod metrics;
mod prediction;

pub use analysis::{Analysis, AnalysisRecord, Evaluation, Verdict};
pub use defect::{Defect, DefectCategory, Severity};
pub use inspection::{Inspection, InspectionDraft, InspectionStatus, InspectionUpdate};
pub use metrics::{
    is_month_label, month_label, palette_ref, DefectTypeShare, MonthlyTrendPoint, QualityMetrics,
    MONTH_LABELS, PALETTE_SIZE,
};
pub use prediction::{top_prediction, PredictionSet, RawPrediction};
