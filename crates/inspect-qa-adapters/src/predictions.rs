//! Prediction file parsing.
//!
//! Two layouts are accepted:
//! - a bare array: `[{"label": "Crack", "confidence": 0.85}]`
//! - a wrapper: `{"image": "pill.jpg", "predictions": [...]}`

use std::path::Path;

use anyhow::{Context, Result};
use inspect_qa_core::{PredictionSet, RawPrediction};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum PredictionFile {
    Bare(Vec<RawPrediction>),
    Wrapped {
        #[serde(default)]
        image: Option<String>,
        predictions: Vec<RawPrediction>,
    },
}

/// Parses prediction JSON.
///
/// Returns the image named by a wrapper, if any, and the predictions.
///
/// # Errors
///
/// Returns an error if the text is not one of the accepted layouts.
pub fn parse_predictions(content: &str) -> Result<(Option<String>, Vec<RawPrediction>)> {
    let file: PredictionFile =
        serde_json::from_str(content).context("Invalid prediction JSON")?;
    Ok(match file {
        PredictionFile::Bare(predictions) => (None, predictions),
        PredictionFile::Wrapped { image, predictions } => (image, predictions),
    })
}

/// Loads a prediction file into a prediction set.
///
/// The set's path is the wrapper's `image` when present, else the file path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_prediction_file(path: &Path) -> Result<PredictionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read prediction file: {}", path.display()))?;
    let (image, predictions) = parse_predictions(&content)
        .with_context(|| format!("Failed to parse prediction file: {}", path.display()))?;

    Ok(PredictionSet::new(
        image.unwrap_or_else(|| path.to_string_lossy().into_owned()),
        predictions,
    ))
}
