//! Output formatting for CLI.

mod json;
mod progress;

pub use json::JsonOutput;
pub use progress::ProgressBar;

#[cfg(test)]
pub(crate) use json::tests::SharedBuf;
