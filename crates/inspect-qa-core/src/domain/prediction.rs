//! Raw classifier output.

use serde::{Deserialize, Serialize};

/// One (label, confidence) pair returned by a classifier oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    /// Class label, free-form.
    pub label: String,
    /// Confidence in 0.0..=1.0.
    pub confidence: f64,
}

impl RawPrediction {
    /// Creates a new prediction.
    #[must_use]
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// Confidence clamped into 0.0..=1.0, with non-finite values treated as 0.0.
    #[must_use]
    pub fn sanitized_confidence(&self) -> f64 {
        if self.confidence.is_finite() {
            self.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Returns true if the lowercased label contains any of the hints.
    #[must_use]
    pub fn matches_any(&self, hints: &[String]) -> bool {
        let label = self.label.to_lowercase();
        hints
            .iter()
            .any(|hint| !hint.is_empty() && label.contains(&hint.to_lowercase()))
    }
}

/// All predictions for a single image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSet {
    /// Image or prediction file the set came from.
    pub path: String,
    /// Predictions, ordered by descending confidence.
    pub predictions: Vec<RawPrediction>,
}

impl PredictionSet {
    /// Creates a new prediction set.
    #[must_use]
    pub fn new(path: impl Into<String>, predictions: Vec<RawPrediction>) -> Self {
        Self {
            path: path.into(),
            predictions,
        }
    }

    /// The highest-confidence prediction, if any.
    #[must_use]
    pub fn top(&self) -> Option<&RawPrediction> {
        top_prediction(&self.predictions)
    }
}

/// Returns the highest-confidence prediction.
///
/// Oracles return predictions sorted descending, but ties and unsorted input
/// resolve to the earliest maximum.
#[must_use]
pub fn top_prediction(predictions: &[RawPrediction]) -> Option<&RawPrediction> {
    predictions.iter().fold(None, |best, p| match best {
        Some(b) if b.sanitized_confidence() >= p.sanitized_confidence() => Some(b),
        _ => Some(p),
    })
}
