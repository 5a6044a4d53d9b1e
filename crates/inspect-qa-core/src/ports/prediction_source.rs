//! Prediction source port for loading classifier output.

use crate::domain::PredictionSet;

/// Port for loading prediction sets from a source.
pub trait PredictionSource: Send + Sync {
    /// Returns an iterator over prediction sets from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if a set fails to load.
    fn prediction_sets(&self) -> Box<dyn Iterator<Item = anyhow::Result<PredictionSet>> + Send + '_>;

    /// Returns the total number of sets, if known.
    fn count_hint(&self) -> Option<usize>;
}
