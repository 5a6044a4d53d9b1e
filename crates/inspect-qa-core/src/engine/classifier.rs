//! Defect classification.
//!
//! Turns raw classifier predictions into categorized, severity-ranked defects:
//! - Predictions at or below the inclusion threshold are dropped
//! - Labels that look like a non-defect class ("good", "normal", ...) are dropped
//! - The remaining labels are matched to a category and banded by confidence

// Confidence is clamped to 0.0..=1.0 before the percentage conversion
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use tracing::trace;

use crate::domain::{Defect, DefectCategory, RawPrediction, Severity};

/// Default labels treated as non-defect classes.
pub const DEFAULT_NON_DEFECT_HINTS: &[&str] = &["good", "normal", "healthy"];

/// Configuration for defect classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Predictions must be strictly above this confidence to become defects.
    pub inclusion_threshold: f64,
    /// Label substrings (case-insensitive) that mark a non-defect class.
    pub non_defect_label_hints: Vec<String>,
    /// Confidence strictly above this is `High`.
    pub high_severity_threshold: f64,
    /// Confidence strictly above this (and not `High`) is `Medium`.
    pub medium_severity_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            inclusion_threshold: 0.30,
            non_defect_label_hints: DEFAULT_NON_DEFECT_HINTS
                .iter()
                .map(ToString::to_string)
                .collect(),
            high_severity_threshold: 0.70,
            medium_severity_threshold: 0.40,
        }
    }
}

impl ClassifierConfig {
    /// Bands a confidence into a severity.
    #[must_use]
    pub fn severity_for(&self, confidence: f64) -> Severity {
        if confidence > self.high_severity_threshold {
            Severity::High
        } else if confidence > self.medium_severity_threshold {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

/// Maps raw predictions to defects.
///
/// Stateless apart from its configuration; safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct DefectClassifier {
    config: ClassifierConfig,
}

impl DefectClassifier {
    /// Creates a classifier with the given configuration.
    #[must_use]
    pub const fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies an ordered prediction list.
    ///
    /// Never fails: unknown labels become `Other` and malformed confidences are
    /// sanitized before thresholding. Output keeps the input order.
    #[must_use]
    pub fn classify(&self, predictions: &[RawPrediction]) -> Vec<Defect> {
        predictions
            .iter()
            .filter_map(|p| self.classify_one(p))
            .collect()
    }

    /// Classifies a single prediction, returning `None` if it is excluded.
    #[must_use]
    pub fn classify_one(&self, prediction: &RawPrediction) -> Option<Defect> {
        let confidence = prediction.sanitized_confidence();

        if confidence <= self.config.inclusion_threshold {
            trace!(
                "Dropping '{}' at {confidence:.2}: below inclusion threshold",
                prediction.label
            );
            return None;
        }
        if prediction.matches_any(&self.config.non_defect_label_hints) {
            trace!("Dropping '{}': non-defect label", prediction.label);
            return None;
        }

        Some(Defect {
            defect_type: prediction.label.clone(),
            category: DefectCategory::from_label(&prediction.label),
            severity: self.config.severity_for(confidence),
            confidence: to_percent(confidence),
        })
    }
}

/// Converts a 0.0..=1.0 confidence to a rounded percentage.
fn to_percent(confidence: f64) -> u8 {
    (confidence * 100.0).round().clamp(0.0, 100.0) as u8
}
