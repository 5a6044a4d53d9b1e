//! Test support utilities for inspect-qa.
//!
//! Provides mocks, fixture builders, and utilities for testing the
//! classification pipeline and the metrics aggregator.
//!
//! # Example
//!
//! ```
//! use inspect_qa_test_support::{InspectionBuilder, MockOracle, PredictionBuilder};
//!
//! // Canned classifier output for one image
//! let oracle = MockOracle::new().with_response("pill.jpg", PredictionBuilder::strong_crack());
//!
//! // A failed inspection carrying one critical defect
//! let inspection = InspectionBuilder::failed("INS-001", 40).build();
//! assert_eq!(inspection.critical_count(), 1);
//! ```

mod builders;
mod mocks;

pub use builders::{critical_crack, defect, minor_scratch, InspectionBuilder, PredictionBuilder};
pub use mocks::{
    FixedClock, MockOracle, MockPredictionSource, MockProgressSink, MockRecomputeScheduler,
};
