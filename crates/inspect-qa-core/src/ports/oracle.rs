//! Classifier oracle port.

use std::path::Path;

use crate::domain::RawPrediction;

/// Port for an external image classifier.
///
/// Implementations may block (model inference, network calls). The label
/// vocabulary is not constrained.
pub trait ClassifierOracle: Send + Sync {
    /// Returns the name of this oracle.
    fn name(&self) -> &'static str;

    /// Classifies an image.
    ///
    /// # Returns
    ///
    /// Predictions ordered by descending confidence, possibly empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be classified.
    fn predict(&self, image: &Path) -> anyhow::Result<Vec<RawPrediction>>;
}
