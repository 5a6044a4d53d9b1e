//! Inspection and seed file loading.

use std::path::Path;

use anyhow::{Context, Result};
use inspect_qa_core::{Inspection, QualityMetrics};
use tracing::debug;

/// Parses inspections from a JSON array or JSON Lines text.
///
/// Blank lines in JSON Lines input are ignored.
///
/// # Errors
///
/// Returns an error naming the offending line if a record fails to parse.
pub fn parse_inspections(content: &str) -> Result<Vec<Inspection>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("Invalid inspection array");
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid inspection on line {}", n + 1))
        })
        .collect()
}

/// Loads inspections from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_inspections(path: &Path) -> Result<Vec<Inspection>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read inspections: {}", path.display()))?;
    let inspections = parse_inspections(&content)
        .with_context(|| format!("Failed to parse inspections: {}", path.display()))?;
    debug!("Loaded {} inspections from {}", inspections.len(), path.display());
    Ok(inspections)
}

/// Loads seed metrics from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_seed(path: &Path) -> Result<QualityMetrics> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed metrics: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed metrics: {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{"id":"INS-001","productName":"Electronic Component A1","batchNumber":"BATCH-2024-001","inspector":"John Smith","status":"passed","score":96,"date":"2024-01-15","time":"14:30","issues":0,"location":"Station A","defects":[]}"#;

    #[test]
    fn test_parse_json_lines() {
        let content = format!("{RECORD}\n\n{}\n", RECORD.replace("INS-001", "INS-002"));
        let inspections = parse_inspections(&content).unwrap();
        assert_eq!(inspections.len(), 2);
        assert_eq!(inspections[1].id, "INS-002");
    }

    #[test]
    fn test_parse_json_array() {
        let content = format!("  [{RECORD}]");
        let inspections = parse_inspections(&content).unwrap();
        assert_eq!(inspections.len(), 1);
        assert_eq!(inspections[0].score, 96);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_inspections("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_error_names_line() {
        let content = format!("{RECORD}\n{{broken\n");
        let err = parse_inspections(&content).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
