//! Inspect QA Adapters - External adapters for inspect-qa.
//!
//! This crate provides adapters for:
//! - Filesystem prediction source
//! - Recorded (sidecar) classifier output
//! - Inspection and seed file loading

pub mod fs;
pub mod oracle;
pub mod predictions;
pub mod records;

pub use fs::FsPredictionSource;
pub use oracle::SidecarOracle;
pub use predictions::{load_prediction_file, parse_predictions};
pub use records::{load_inspections, load_seed, parse_inspections};
