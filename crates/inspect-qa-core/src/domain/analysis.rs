//! Analysis results for a single image.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Defect, Inspection, InspectionDraft, InspectionStatus};

/// Tri-state verdict produced by the scoring policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No blocking defects.
    Pass,
    /// At least one high-severity defect.
    Fail,
    /// Needs a human decision.
    Review,
}

impl Verdict {
    /// Maps the verdict onto an inspection status.
    ///
    /// `review_status` is the caller's choice for `Review`.
    #[must_use]
    pub const fn to_status(self, review_status: InspectionStatus) -> InspectionStatus {
        match self {
            Self::Pass => InspectionStatus::Passed,
            Self::Fail => InspectionStatus::Failed,
            Self::Review => review_status,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Review => "review",
        })
    }
}

/// Score and verdict for one defect set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Overall score (0-100).
    pub overall_score: u8,
    /// Verdict.
    #[serde(rename = "status")]
    pub verdict: Verdict,
}

/// Defects plus their evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Extracted defects.
    pub defects: Vec<Defect>,
    /// Overall score (0-100).
    pub overall_score: u8,
    /// Verdict.
    #[serde(rename = "status")]
    pub verdict: Verdict,
}

impl Analysis {
    /// Combines defects with their evaluation.
    #[must_use]
    pub const fn new(defects: Vec<Defect>, evaluation: Evaluation) -> Self {
        Self {
            defects,
            overall_score: evaluation.overall_score,
            verdict: evaluation.verdict,
        }
    }

    /// Packages the analysis into an inspection record.
    #[must_use]
    pub fn into_inspection(
        self,
        draft: InspectionDraft,
        review_status: InspectionStatus,
    ) -> Inspection {
        Inspection {
            id: draft.id,
            product_name: draft.product_name,
            batch_number: draft.batch_number,
            inspector: draft.inspector,
            status: self.verdict.to_status(review_status),
            score: self.overall_score,
            date: draft.date,
            time: draft.time,
            issues: self.defects.len(),
            location: draft.location,
            defects: self.defects,
        }
    }
}

/// Output record for one analyzed prediction set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Image or prediction file path.
    pub path: String,
    /// Timestamp of analysis (ISO 8601).
    pub timestamp: String,
    /// Extracted defects.
    pub defects: Vec<Defect>,
    /// Overall score (0-100).
    pub overall_score: u8,
    /// Verdict.
    #[serde(rename = "status")]
    pub verdict: Verdict,
}

impl AnalysisRecord {
    /// Creates a record for `analysis` of `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, timestamp: impl Into<String>, analysis: Analysis) -> Self {
        Self {
            path: path.into(),
            timestamp: timestamp.into(),
            defects: analysis.defects,
            overall_score: analysis.overall_score,
            verdict: analysis.verdict,
        }
    }
}
