//! Inspection records owned by the metrics aggregator.

use serde::{Deserialize, Serialize};

use super::Defect;

/// One quality check of a product instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    /// Unique identifier.
    pub id: String,
    /// Inspected product.
    pub product_name: String,
    /// Production batch.
    pub batch_number: String,
    /// Person or station operator responsible.
    pub inspector: String,
    /// Outcome.
    pub status: InspectionStatus,
    /// Overall quality score (0-100).
    pub score: u8,
    /// Inspection date (`YYYY-MM-DD`).
    pub date: String,
    /// Inspection time (`HH:MM`).
    pub time: String,
    /// Number of defects; kept equal to `defects.len()`.
    pub issues: usize,
    /// Inspection station.
    pub location: String,
    /// Defects found, in classifier order.
    #[serde(default)]
    pub defects: Vec<Defect>,
}

impl Inspection {
    /// Number of high-severity defects.
    #[must_use]
    pub fn critical_count(&self) -> usize {
        self.defects.iter().filter(|d| d.is_critical()).count()
    }

    /// Brings `issues` back in line with the defect list.
    ///
    /// Returns true if the value had to change.
    pub fn normalize_issues(&mut self) -> bool {
        let count = self.defects.len();
        if self.issues == count {
            false
        } else {
            self.issues = count;
            true
        }
    }

    /// Applies the present fields of `update`.
    pub fn apply(&mut self, update: InspectionUpdate) {
        let InspectionUpdate {
            product_name,
            batch_number,
            inspector,
            status,
            score,
            date,
            time,
            issues,
            location,
            defects,
        } = update;

        if let Some(v) = product_name {
            self.product_name = v;
        }
        if let Some(v) = batch_number {
            self.batch_number = v;
        }
        if let Some(v) = inspector {
            self.inspector = v;
        }
        if let Some(v) = status {
            self.status = v;
        }
        if let Some(v) = score {
            self.score = v.min(100);
        }
        if let Some(v) = date {
            self.date = v;
        }
        if let Some(v) = time {
            self.time = v;
        }
        if let Some(v) = issues {
            self.issues = v;
        }
        if let Some(v) = location {
            self.location = v;
        }
        if let Some(v) = defects {
            self.defects = v;
        }
    }

    /// Returns true if any searchable field contains `term` (case-insensitive).
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [
            &self.id,
            &self.product_name,
            &self.batch_number,
            &self.inspector,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Externally visible inspection status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    /// Inspection passed.
    Passed,
    /// Inspection failed.
    Failed,
    /// Not yet analyzed, or awaiting review.
    Pending,
}

/// Partial set of fields for updating an inspection.
///
/// The id is not updatable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionUpdate {
    pub product_name: Option<String>,
    pub batch_number: Option<String>,
    pub inspector: Option<String>,
    pub status: Option<InspectionStatus>,
    pub score: Option<u8>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub issues: Option<usize>,
    pub location: Option<String>,
    pub defects: Option<Vec<Defect>>,
}

impl InspectionUpdate {
    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Descriptive fields supplied by the caller when packaging an analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectionDraft {
    pub id: String,
    pub product_name: String,
    pub batch_number: String,
    pub inspector: String,
    pub date: String,
    pub time: String,
    pub location: String,
}

impl InspectionDraft {
    /// Creates a draft with the given id and empty descriptive fields.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}
