//! Fixture builders for testing.

use inspect_qa_core::domain::{
    Defect, DefectCategory, Inspection, InspectionStatus, RawPrediction, Severity,
};

/// Builder for classifier output fixtures.
///
/// Provides convenience methods for prediction lists that exercise specific
/// classifier and scoring paths.
pub struct PredictionBuilder;

impl PredictionBuilder {
    // === Defect Signals ===

    /// A single strong crack: one high-severity defect, fail at 60.
    #[must_use]
    pub fn strong_crack() -> Vec<RawPrediction> {
        vec![
            RawPrediction::new("Crack", 0.85),
            RawPrediction::new("Good", 0.10),
        ]
    }

    /// Medium scratch plus low stain: review at 75.
    #[must_use]
    pub fn scratch_and_stain() -> Vec<RawPrediction> {
        vec![
            RawPrediction::new("Surface Scratch", 0.55),
            RawPrediction::new("stain", 0.35),
            RawPrediction::new("good", 0.10),
        ]
    }

    /// A single low-severity defect: review at 85.
    #[must_use]
    pub fn faint_discoloration() -> Vec<RawPrediction> {
        vec![
            RawPrediction::new("discoloration", 0.38),
            RawPrediction::new("good", 0.30),
        ]
    }

    // === Clean Signals ===

    /// Confident non-defect top result: pass at 95.
    #[must_use]
    pub fn good_pill() -> Vec<RawPrediction> {
        vec![
            RawPrediction::new("Good Pill", 0.90),
            RawPrediction::new("scratch", 0.05),
        ]
    }

    /// No defect above threshold and no strong positive: ambiguous.
    #[must_use]
    pub fn ambiguous() -> Vec<RawPrediction> {
        vec![
            RawPrediction::new("blob", 0.25),
            RawPrediction::new("good", 0.20),
        ]
    }

    /// Empty classifier output.
    #[must_use]
    pub fn empty() -> Vec<RawPrediction> {
        Vec::new()
    }

    /// Serializes predictions as a bare JSON array.
    #[must_use]
    pub fn to_json(predictions: &[RawPrediction]) -> String {
        let items: Vec<String> = predictions
            .iter()
            .map(|p| {
                format!(
                    r#"{{"label":"{}","confidence":{}}}"#,
                    p.label.replace('"', "\\\""),
                    p.confidence
                )
            })
            .collect();
        format!("[{}]", items.join(","))
    }
}

/// Builder for inspection records.
///
/// Starts from a passed, defect-free inspection and adjusts fields fluently.
#[derive(Debug, Clone)]
pub struct InspectionBuilder {
    inspection: Inspection,
}

impl InspectionBuilder {
    /// Creates a builder for a passed inspection with score 95.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            inspection: Inspection {
                id: id.into(),
                product_name: "Electronic Component A1".into(),
                batch_number: "BATCH-2024-001".into(),
                inspector: "John Smith".into(),
                status: InspectionStatus::Passed,
                score: 95,
                date: "2024-01-15".into(),
                time: "14:30".into(),
                issues: 0,
                location: "Station A".into(),
                defects: Vec::new(),
            },
        }
    }

    /// A passed inspection with the given score.
    #[must_use]
    pub fn passed(id: impl Into<String>, score: u8) -> Self {
        Self::new(id).score(score)
    }

    /// A failed inspection with one critical crack.
    #[must_use]
    pub fn failed(id: impl Into<String>, score: u8) -> Self {
        Self::new(id)
            .status(InspectionStatus::Failed)
            .score(score)
            .with_defect(critical_crack())
    }

    /// A pending inspection with the given score.
    #[must_use]
    pub fn pending(id: impl Into<String>, score: u8) -> Self {
        Self::new(id).status(InspectionStatus::Pending).score(score)
    }

    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: InspectionStatus) -> Self {
        self.inspection.status = status;
        self
    }

    /// Sets the score.
    #[must_use]
    pub const fn score(mut self, score: u8) -> Self {
        self.inspection.score = score;
        self
    }

    /// Sets the product name.
    #[must_use]
    pub fn product(mut self, name: impl Into<String>) -> Self {
        self.inspection.product_name = name.into();
        self
    }

    /// Sets the batch number.
    #[must_use]
    pub fn batch(mut self, batch: impl Into<String>) -> Self {
        self.inspection.batch_number = batch.into();
        self
    }

    /// Sets the inspector.
    #[must_use]
    pub fn inspector(mut self, inspector: impl Into<String>) -> Self {
        self.inspection.inspector = inspector.into();
        self
    }

    /// Appends a defect and keeps `issues` in step.
    #[must_use]
    pub fn with_defect(mut self, defect: Defect) -> Self {
        self.inspection.defects.push(defect);
        self.inspection.issues = self.inspection.defects.len();
        self
    }

    /// Overrides `issues` without touching the defect list.
    #[must_use]
    pub const fn issues(mut self, issues: usize) -> Self {
        self.inspection.issues = issues;
        self
    }

    /// Returns the built inspection.
    #[must_use]
    pub fn build(self) -> Inspection {
        self.inspection
    }
}

/// Builds a defect with the given fields.
#[must_use]
pub fn defect(
    defect_type: &str,
    category: DefectCategory,
    severity: Severity,
    confidence: u8,
) -> Defect {
    Defect {
        defect_type: defect_type.into(),
        category,
        severity,
        confidence,
    }
}

/// A high-severity crack.
#[must_use]
pub fn critical_crack() -> Defect {
    defect("Crack", DefectCategory::Crack, Severity::High, 85)
}

/// A medium-severity scratch.
#[must_use]
pub fn minor_scratch() -> Defect {
    defect("Surface Scratch", DefectCategory::Scratch, Severity::Medium, 55)
}
