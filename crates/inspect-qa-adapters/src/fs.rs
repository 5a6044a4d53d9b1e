//! Filesystem adapter for loading prediction sets.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use inspect_qa_core::{ClassifierOracle, PredictionSet, PredictionSource};
use tracing::{debug, warn};

use crate::oracle::{candidates, SidecarOracle};
use crate::predictions::load_prediction_file;

/// Image extensions handed to the classifier oracle.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp", "bmp", "gif"];
/// Extension of recorded prediction files.
const PREDICTION_EXTENSION: &str = "json";

/// Filesystem prediction source adapter.
///
/// Prediction files (`.json`) are parsed directly; image files are classified
/// by the configured oracle. Sidecar files belonging to an image are not
/// read twice.
pub struct FsPredictionSource {
    paths: Vec<PathBuf>,
    recursive: bool,
    oracle: Arc<dyn ClassifierOracle>,
}

impl FsPredictionSource {
    /// Creates a new filesystem prediction source using the sidecar oracle.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self {
            paths,
            recursive,
            oracle: Arc::new(SidecarOracle::new()),
        }
    }

    /// Replaces the oracle used for image files.
    #[must_use]
    pub fn with_oracle(mut self, oracle: Arc<dyn ClassifierOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    /// Collects all supported files from the configured paths.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_file() {
                if is_supported(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        let mut paths: Vec<_> = entries.flatten().map(|e| e.path()).collect();
        paths.sort();

        for path in paths {
            if path.is_file() && is_supported(&path) && !is_sidecar(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }

    fn load(&self, path: &Path) -> Result<PredictionSet> {
        if is_prediction_file(path) {
            return load_prediction_file(path);
        }

        debug!("Classifying {} with {} oracle", path.display(), self.oracle.name());
        let predictions = self
            .oracle
            .predict(path)
            .with_context(|| format!("Classifier failed for {}", path.display()))?;
        Ok(PredictionSet::new(path.to_string_lossy(), predictions))
    }
}

impl PredictionSource for FsPredictionSource {
    fn prediction_sets(&self) -> Box<dyn Iterator<Item = Result<PredictionSet>> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} prediction inputs", files.len());

        Box::new(files.into_iter().map(|path| self.load(&path)))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

fn is_image(path: &Path) -> bool {
    extension(path).is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

fn is_prediction_file(path: &Path) -> bool {
    extension(path).is_some_and(|e| e == PREDICTION_EXTENSION)
}

/// Checks if a path is a prediction file or a supported image.
fn is_supported(path: &Path) -> bool {
    is_prediction_file(path) || is_image(path)
}

/// Checks if a prediction file belongs to an image in the same directory.
fn is_sidecar(path: &Path) -> bool {
    if !is_prediction_file(path) {
        return false;
    }

    // pill.jpg.json
    let stripped = path.with_extension("");
    if is_image(&stripped) {
        return true;
    }

    // pill.json next to pill.<image ext>
    IMAGE_EXTENSIONS.iter().any(|ext| {
        let image = path.with_extension(ext);
        image.is_file() && candidates(&image)[1] == path
    })
}
