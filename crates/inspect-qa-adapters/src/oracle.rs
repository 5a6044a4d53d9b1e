//! Classifier oracle backed by recorded predictions.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use inspect_qa_core::{ClassifierOracle, RawPrediction};
use tracing::debug;

use crate::predictions::parse_predictions;

/// Oracle that replays predictions stored next to each image.
///
/// For `pill.jpg` it reads `pill.jpg.json`, falling back to `pill.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarOracle;

impl SidecarOracle {
    /// Creates a new sidecar oracle.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the sidecar path for `image`, if one exists.
    #[must_use]
    pub fn sidecar_path(image: &Path) -> Option<PathBuf> {
        candidates(image).into_iter().find(|p| p.is_file())
    }
}

impl ClassifierOracle for SidecarOracle {
    fn name(&self) -> &'static str {
        "sidecar"
    }

    fn predict(&self, image: &Path) -> Result<Vec<RawPrediction>> {
        let sidecar = Self::sidecar_path(image).with_context(|| {
            format!("No recorded predictions for image: {}", image.display())
        })?;
        debug!("Reading predictions from {}", sidecar.display());

        let content = std::fs::read_to_string(&sidecar)
            .with_context(|| format!("Failed to read predictions: {}", sidecar.display()))?;
        let (_, predictions) = parse_predictions(&content)
            .with_context(|| format!("Failed to parse predictions: {}", sidecar.display()))?;
        Ok(predictions)
    }
}

/// Sidecar locations in lookup order.
pub(crate) fn candidates(image: &Path) -> [PathBuf; 2] {
    let mut appended = image.as_os_str().to_owned();
    appended.push(".json");
    [PathBuf::from(appended), image.with_extension("json")]
}
