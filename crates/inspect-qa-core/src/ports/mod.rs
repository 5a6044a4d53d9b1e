//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the engine and external adapters.

mod clock;
mod oracle;
mod prediction_source;
mod progress;
mod result_output;
mod scheduler;

pub use clock::{Clock, SystemClock};
pub use oracle::ClassifierOracle;
pub use prediction_source::PredictionSource;
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
pub use scheduler::{NoopScheduler, RecomputeScheduler};
