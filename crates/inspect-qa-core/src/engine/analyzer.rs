//! Classification and scoring for one prediction set.

use super::classifier::{ClassifierConfig, DefectClassifier};
use super::scoring::{ScoringConfig, ScoringPolicy};
use crate::domain::{top_prediction, Analysis, RawPrediction};
use crate::error::EngineError;

/// Runs the defect classifier and the scoring policy in sequence.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    classifier: DefectClassifier,
    policy: ScoringPolicy,
}

impl Analyzer {
    /// Creates an analyzer from classifier and scoring configuration.
    #[must_use]
    pub const fn new(classifier: ClassifierConfig, scoring: ScoringConfig) -> Self {
        Self {
            classifier: DefectClassifier::new(classifier),
            policy: ScoringPolicy::new(scoring),
        }
    }

    /// The defect classifier.
    #[must_use]
    pub const fn classifier(&self) -> &DefectClassifier {
        &self.classifier
    }

    /// The scoring policy.
    #[must_use]
    pub const fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Analyzes the predictions for one image.
    ///
    /// The highest-confidence prediction is used as the top result.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientEvidence` if `predictions` is empty.
    pub fn analyze(&self, predictions: &[RawPrediction]) -> Result<Analysis, EngineError> {
        let defects = self.classifier.classify(predictions);
        let evaluation = self
            .policy
            .evaluate(&defects, top_prediction(predictions))?;
        Ok(Analysis::new(defects, evaluation))
    }
}
