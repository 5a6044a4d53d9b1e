//! Configuration file support for inspect-qa.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/inspect-qa/config.toml` (lowest priority)
//! - Project-local: `.inspect-qa.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Defect classification settings.
    pub classifier: ClassifierSection,
    /// Scoring policy settings.
    pub scoring: ScoringSection,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Defect classification configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierSection {
    /// Predictions must be above this confidence (0.0-1.0).
    pub inclusion_threshold: Option<f64>,
    /// Labels containing any of these are not defects.
    pub non_defect_label_hints: Option<Vec<String>>,
    /// Confidence above this is high severity (0.0-1.0).
    pub high_severity_threshold: Option<f64>,
    /// Confidence above this is medium severity (0.0-1.0).
    pub medium_severity_threshold: Option<f64>,
}

/// Scoring policy configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringSection {
    /// A "good" top result must be above this confidence (0.0-1.0).
    pub positive_confidence: Option<f64>,
    /// Verdict without defects or a strong positive: "pass" or "review".
    pub ambiguous_verdict: Option<String>,
    /// Score without defects or a strong positive (0-100).
    pub ambiguous_score: Option<u8>,
    /// Inspection status for review verdicts: "pending" or "failed".
    pub review_status: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/inspect-qa/config.toml`
    /// 2. Project-local: `.inspect-qa.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        let unit_ranges = [
            ("classifier.inclusion_threshold", self.classifier.inclusion_threshold),
            ("classifier.high_severity_threshold", self.classifier.high_severity_threshold),
            ("classifier.medium_severity_threshold", self.classifier.medium_severity_threshold),
            ("scoring.positive_confidence", self.scoring.positive_confidence),
        ];
        for (name, value) in unit_ranges {
            if let Some(t) = value {
                if !(0.0..=1.0).contains(&t) {
                    return Err(format!("{name} must be 0.0-1.0, got {t}"));
                }
            }
        }

        if let (Some(medium), Some(high)) = (
            self.classifier.medium_severity_threshold,
            self.classifier.high_severity_threshold,
        ) {
            if medium > high {
                return Err(format!(
                    "classifier.medium_severity_threshold ({medium}) exceeds high_severity_threshold ({high})"
                ));
            }
        }

        if let Some(score) = self.scoring.ambiguous_score {
            if score > 100 {
                return Err(format!("scoring.ambiguous_score must be 0-100, got {score}"));
            }
        }

        if let Some(ref v) = self.scoring.ambiguous_verdict {
            if v != "pass" && v != "review" {
                return Err(format!(
                    "scoring.ambiguous_verdict must be 'pass' or 'review', got '{v}'"
                ));
            }
        }
        if let Some(ref s) = self.scoring.review_status {
            if s != "pending" && s != "failed" {
                return Err(format!(
                    "scoring.review_status must be 'pending' or 'failed', got '{s}'"
                ));
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Classifier
        self.classifier.inclusion_threshold = other
            .classifier
            .inclusion_threshold
            .or(self.classifier.inclusion_threshold);
        self.classifier.non_defect_label_hints = other
            .classifier
            .non_defect_label_hints
            .or_else(|| self.classifier.non_defect_label_hints.take());
        self.classifier.high_severity_threshold = other
            .classifier
            .high_severity_threshold
            .or(self.classifier.high_severity_threshold);
        self.classifier.medium_severity_threshold = other
            .classifier
            .medium_severity_threshold
            .or(self.classifier.medium_severity_threshold);

        // Scoring
        self.scoring.positive_confidence = other
            .scoring
            .positive_confidence
            .or(self.scoring.positive_confidence);
        self.scoring.ambiguous_verdict = other
            .scoring
            .ambiguous_verdict
            .or_else(|| self.scoring.ambiguous_verdict.take());
        self.scoring.ambiguous_score = other.scoring.ambiguous_score.or(self.scoring.ambiguous_score);
        self.scoring.review_status = other
            .scoring
            .review_status
            .or_else(|| self.scoring.review_status.take());

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("inspect-qa").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.inspect-qa.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".inspect-qa.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
