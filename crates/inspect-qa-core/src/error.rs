//! Engine error taxonomy.
//!
//! Every variant is recoverable: callers report it and leave state untouched.

use thiserror::Error;

/// Errors returned by the classification and aggregation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An inspection with this id is already recorded.
    #[error("Inspection already exists: {id}")]
    DuplicateId { id: String },

    /// No inspection with this id is recorded.
    #[error("Inspection not found: {id}")]
    NotFound { id: String },

    /// The classifier returned nothing to score.
    #[error("Insufficient evidence: classifier returned no usable predictions")]
    InsufficientEvidence,
}

impl EngineError {
    /// Creates a `DuplicateId` error.
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Creates a `NotFound` error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}
