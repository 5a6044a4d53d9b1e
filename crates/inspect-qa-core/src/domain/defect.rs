//! Defect types produced from classifier output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A quality defect extracted from one classifier prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defect {
    /// Classifier label the defect was derived from.
    #[serde(rename = "type")]
    pub defect_type: String,
    /// Category matched from the label.
    pub category: DefectCategory,
    /// Severity band derived from the confidence.
    pub severity: Severity,
    /// Classifier confidence as a percentage (0-100).
    pub confidence: u8,
}

impl Defect {
    /// Returns true if this defect counts as a critical issue.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::High
    }
}

/// The category of a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectCategory {
    /// Surface scratches.
    Scratch,
    /// Cracks and fractures.
    Crack,
    /// Foreign material or contamination.
    Contamination,
    /// Color variation or discoloration.
    Color,
    /// Imprint or marking faults.
    Imprint,
    /// Anything the label did not identify.
    Other,
}

impl DefectCategory {
    /// Categories in label-matching priority order, followed by `Other`.
    pub const ALL: [Self; 6] = [
        Self::Scratch,
        Self::Crack,
        Self::Contamination,
        Self::Color,
        Self::Imprint,
        Self::Other,
    ];

    /// Substrings that identify this category in a lowercased label.
    #[must_use]
    pub const fn label_patterns(self) -> &'static [&'static str] {
        match self {
            Self::Scratch => &["scratch"],
            Self::Crack => &["crack"],
            Self::Contamination => &["contamination"],
            Self::Color => &["color", "colour"],
            Self::Imprint => &["imprint"],
            Self::Other => &[],
        }
    }

    /// Matches a classifier label against the category patterns.
    ///
    /// Matching is case-insensitive and the first category in priority
    /// order wins. Labels that match nothing fall back to `Other`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| {
                category
                    .label_patterns()
                    .iter()
                    .any(|pattern| label.contains(pattern))
            })
            .unwrap_or(Self::Other)
    }

    /// Display name used by the defect-type distribution ("Scratch", ...).
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Scratch => "Scratch",
            Self::Crack => "Crack",
            Self::Contamination => "Contamination",
            Self::Color => "Color",
            Self::Imprint => "Imprint",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for DefectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Severity of a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Cosmetic, does not affect the verdict beyond review.
    Low,
    /// Needs a human review.
    Medium,
    /// Fails the inspection.
    High,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_label_case_insensitive() {
        assert_eq!(DefectCategory::from_label("Crack"), DefectCategory::Crack);
        assert_eq!(
            DefectCategory::from_label("SURFACE SCRATCH"),
            DefectCategory::Scratch
        );
        assert_eq!(
            DefectCategory::from_label("ink contamination"),
            DefectCategory::Contamination
        );
    }

    #[test]
    fn test_category_priority_order() {
        // Scratch is checked before crack
        assert_eq!(
            DefectCategory::from_label("cracked scratch"),
            DefectCategory::Scratch
        );
        assert_eq!(
            DefectCategory::from_label("color imprint"),
            DefectCategory::Color
        );
    }

    #[test]
    fn test_category_colour_spelling() {
        assert_eq!(
            DefectCategory::from_label("Colour Variation"),
            DefectCategory::Color
        );
    }

    #[test]
    fn test_unknown_label_is_other() {
        assert_eq!(DefectCategory::from_label("chipped"), DefectCategory::Other);
        assert_eq!(DefectCategory::from_label(""), DefectCategory::Other);
    }

    #[test]
    fn test_serde_names() {
        let defect = Defect {
            defect_type: "Crack".into(),
            category: DefectCategory::Crack,
            severity: Severity::High,
            confidence: 85,
        };
        let json = serde_json::to_value(&defect).unwrap();
        assert_eq!(json["type"], "Crack");
        assert_eq!(json["category"], "crack");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["confidence"], 85);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }
}
