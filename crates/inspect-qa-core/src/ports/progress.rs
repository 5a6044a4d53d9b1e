//! Progress reporting port for UI integration.

use crate::domain::AnalysisRecord;

/// Events emitted during analysis for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Analysis started for a prediction set.
    Started {
        /// Path of the image or prediction file.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total sets in batch, if known.
        total: Option<usize>,
    },
    /// Analysis completed for a prediction set.
    Completed {
        /// The analysis record.
        record: AnalysisRecord,
    },
    /// A set was skipped (unreadable, or no usable evidence).
    Skipped {
        /// Path of the image or prediction file.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All sets have been processed.
    Finished {
        /// Total sets analyzed successfully.
        processed: usize,
        /// Total sets skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
