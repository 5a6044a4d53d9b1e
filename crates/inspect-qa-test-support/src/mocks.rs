//! Mock implementations of core port traits.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use inspect_qa_core::domain::{PredictionSet, RawPrediction};
use inspect_qa_core::ports::{
    ClassifierOracle, Clock, PredictionSource, ProgressEvent, ProgressSink, RecomputeScheduler,
};
use time::OffsetDateTime;

/// Mock implementation of `ClassifierOracle` for testing.
///
/// Returns canned predictions per image path and records every call.
pub struct MockOracle {
    responses: HashMap<PathBuf, Vec<RawPrediction>>,
    fallback: Option<Vec<RawPrediction>>,
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockOracle {
    /// Creates an oracle with no canned responses; every call fails.
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            fallback: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates an oracle returning `predictions` for every image.
    #[must_use]
    pub fn always(predictions: Vec<RawPrediction>) -> Self {
        Self {
            fallback: Some(predictions),
            ..Self::new()
        }
    }

    /// Adds a canned response for `image`.
    #[must_use]
    pub fn with_response(mut self, image: impl AsRef<Path>, predictions: Vec<RawPrediction>) -> Self {
        self.responses
            .insert(image.as_ref().to_path_buf(), predictions);
        self
    }

    /// Returns the images classified so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierOracle for MockOracle {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn predict(&self, image: &Path) -> anyhow::Result<Vec<RawPrediction>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(image.to_path_buf());

        self.responses
            .get(image)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No canned predictions for {}", image.display()))
    }
}

/// Mock implementation of `PredictionSource` for testing.
///
/// Yields pre-built prediction sets and tracks iteration for assertions.
pub struct MockPredictionSource {
    sets: Vec<PredictionSet>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockPredictionSource {
    /// Creates a new mock source with the given sets.
    #[must_use]
    pub fn new(sets: Vec<PredictionSet>) -> Self {
        Self {
            sets,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PredictionSource for MockPredictionSource {
    fn prediction_sets(
        &self,
    ) -> Box<dyn Iterator<Item = anyhow::Result<PredictionSet>> + Send + '_> {
        if let Ok(mut c) = self.iteration_count.lock() {
            *c += 1;
        }
        Box::new(self.sets.iter().cloned().map(Ok))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.sets.len())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Mock implementation of `RecomputeScheduler` that counts requests.
#[derive(Default)]
pub struct MockRecomputeScheduler {
    scheduled: Mutex<usize>,
}

impl MockRecomputeScheduler {
    /// Creates a new mock scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of times a recompute was scheduled.
    #[must_use]
    pub fn scheduled_count(&self) -> usize {
        *self
            .scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecomputeScheduler for MockRecomputeScheduler {
    fn schedule(&self) {
        *self
            .scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
    }
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl FixedClock {
    /// A clock frozen at 2024-10-15 12:00 UTC (month label "Oct").
    #[must_use]
    pub const fn october() -> Self {
        Self(time::macros::datetime!(2024-10-15 12:00 UTC))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
