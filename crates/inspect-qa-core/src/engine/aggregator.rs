//! Rolling quality metrics over the recorded inspections.
//!
//! The aggregator is the single owner of the inspection collection and the
//! trend window. Every mutation triggers a recompute, either immediately or
//! coalesced behind a dirty flag for event-driven hosts.

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use std::fmt;
use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, warn};

use super::trend::TrendWindow;
use crate::domain::{
    DefectCategory, DefectTypeShare, Inspection, InspectionStatus, InspectionUpdate,
    MonthlyTrendPoint, QualityMetrics,
};
use crate::error::EngineError;
use crate::ports::{Clock, NoopScheduler, RecomputeScheduler, SystemClock};

/// When mutations recompute the metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecomputeMode {
    /// Recompute once before each mutation returns.
    #[default]
    Immediate,
    /// Mark dirty and notify the scheduler; recompute on `flush`.
    Deferred,
}

/// Owns the inspection collection and maintains `QualityMetrics`.
pub struct MetricsAggregator {
    inspections: Vec<Inspection>,
    seed: QualityMetrics,
    trend: TrendWindow,
    metrics: Arc<QualityMetrics>,
    mode: RecomputeMode,
    dirty: bool,
    generation: u64,
    last_updated: OffsetDateTime,
    clock: Arc<dyn Clock>,
    scheduler: Arc<dyn RecomputeScheduler>,
}

impl MetricsAggregator {
    /// Creates an aggregator whose empty state is `seed`.
    #[must_use]
    pub fn new(seed: QualityMetrics) -> Self {
        Self::with_clock(seed, Arc::new(SystemClock))
    }

    /// Creates an aggregator reading the current month from `clock`.
    #[must_use]
    pub fn with_clock(seed: QualityMetrics, clock: Arc<dyn Clock>) -> Self {
        let trend = TrendWindow::seeded(&seed.monthly_trends);
        let defect_types = if seed.defect_types.is_empty() {
            warn!("Seed metrics have no defect types; using the default distribution");
            QualityMetrics::seeded().defect_types
        } else {
            seed.defect_types
        };
        let seed = QualityMetrics {
            total_inspections: 0,
            monthly_trends: trend.window().to_vec(),
            defect_types,
            ..seed
        };
        Self {
            inspections: Vec::new(),
            trend,
            metrics: Arc::new(seed.clone()),
            seed,
            mode: RecomputeMode::Immediate,
            dirty: false,
            generation: 0,
            last_updated: clock.now(),
            clock,
            scheduler: Arc::new(NoopScheduler),
        }
    }

    /// Switches to deferred recompute, notifying `scheduler` when one is pending.
    #[must_use]
    pub fn deferred(mut self, scheduler: Arc<dyn RecomputeScheduler>) -> Self {
        self.mode = RecomputeMode::Deferred;
        self.scheduler = scheduler;
        self
    }

    /// Changes the recompute mode.
    ///
    /// Leaving deferred mode flushes any pending recompute.
    pub fn set_mode(&mut self, mode: RecomputeMode) {
        self.mode = mode;
        if mode == RecomputeMode::Immediate {
            self.flush();
        }
    }

    // === Commands ===

    /// Records a new inspection.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if an inspection with the same id exists.
    pub fn add(&mut self, mut inspection: Inspection) -> Result<(), EngineError> {
        if self.position(&inspection.id).is_some() {
            return Err(EngineError::duplicate(inspection.id));
        }
        normalize(&mut inspection);
        debug!("Adding inspection {}", inspection.id);
        self.inspections.push(inspection);
        self.changed();
        Ok(())
    }

    /// Merges `update` into the inspection with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no inspection has this id.
    pub fn update(&mut self, id: &str, update: InspectionUpdate) -> Result<(), EngineError> {
        let index = self.position(id).ok_or_else(|| EngineError::not_found(id))?;
        let inspection = &mut self.inspections[index];
        inspection.apply(update);
        normalize(inspection);
        debug!("Updated inspection {id}");
        self.changed();
        Ok(())
    }

    /// Removes and returns the inspection with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no inspection has this id.
    pub fn remove(&mut self, id: &str) -> Result<Inspection, EngineError> {
        let index = self.position(id).ok_or_else(|| EngineError::not_found(id))?;
        let removed = self.inspections.remove(index);
        debug!("Removed inspection {id}");
        self.changed();
        Ok(removed)
    }

    /// Runs a pending deferred recompute.
    ///
    /// Returns true if a recompute ran.
    pub fn flush(&mut self) -> bool {
        if self.dirty {
            self.recompute();
            true
        } else {
            false
        }
    }

    /// Recomputes the metrics from the current collection and publishes them.
    ///
    /// Idempotent: calling it again without a mutation in between produces
    /// an equal snapshot.
    pub fn recompute(&mut self) -> Arc<QualityMetrics> {
        let metrics = Arc::new(self.compute());
        self.metrics = Arc::clone(&metrics);
        self.dirty = false;
        self.generation += 1;
        debug!(
            "Recomputed metrics (generation {}): {} inspections, score {}, {} critical",
            self.generation,
            metrics.total_inspections,
            metrics.overall_score,
            metrics.critical_issues
        );
        metrics
    }

    // === Queries ===

    /// The current metrics snapshot.
    ///
    /// In deferred mode this is the snapshot from the last recompute.
    #[must_use]
    pub fn metrics(&self) -> Arc<QualityMetrics> {
        Arc::clone(&self.metrics)
    }

    /// All inspections in insertion order.
    #[must_use]
    pub fn inspections(&self) -> &[Inspection] {
        &self.inspections
    }

    /// Looks up an inspection by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Inspection> {
        self.inspections.iter().find(|i| i.id == id)
    }

    /// Inspections whose id, product, batch or inspector contains `term`.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Inspection> {
        self.inspections.iter().filter(|i| i.matches(term)).collect()
    }

    /// Number of inspections with `status`.
    #[must_use]
    pub fn count_by_status(&self, status: InspectionStatus) -> usize {
        self.inspections
            .iter()
            .filter(|i| i.status == status)
            .count()
    }

    /// Number of recorded inspections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inspections.len()
    }

    /// Returns true if no inspection is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inspections.is_empty()
    }

    /// Returns true if a deferred recompute is pending.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of recomputes performed so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Time of the last mutation (or construction).
    #[must_use]
    pub const fn last_updated(&self) -> OffsetDateTime {
        self.last_updated
    }

    /// The seed used for the empty collection.
    #[must_use]
    pub const fn seed(&self) -> &QualityMetrics {
        &self.seed
    }

    /// The recompute mode.
    #[must_use]
    pub const fn mode(&self) -> RecomputeMode {
        self.mode
    }

    // === Internals ===

    fn position(&self, id: &str) -> Option<usize> {
        self.inspections.iter().position(|i| i.id == id)
    }

    fn changed(&mut self) {
        self.last_updated = self.clock.now();
        match self.mode {
            RecomputeMode::Immediate => {
                self.recompute();
            }
            RecomputeMode::Deferred => {
                if !self.dirty {
                    self.dirty = true;
                    self.scheduler.schedule();
                }
            }
        }
    }

    fn compute(&mut self) -> QualityMetrics {
        if self.inspections.is_empty() {
            return self.seed.clone();
        }

        let total = self.inspections.len();
        let passed = self.count_by_status(InspectionStatus::Passed);
        let failed = self.count_by_status(InspectionStatus::Failed);

        let pass_rate = round2(100.0 * passed as f64 / total as f64);
        let defect_rate = round2(100.0 * failed as f64 / total as f64);

        let score_sum: u64 = self.inspections.iter().map(|i| u64::from(i.score)).sum();
        let overall_score = (score_sum as f64 / total as f64).round().clamp(0.0, 100.0) as u8;

        let critical_issues = self.inspections.iter().map(Inspection::critical_count).sum();

        let defect_types = self
            .defect_distribution()
            .unwrap_or_else(|| self.seed.defect_types.clone());

        self.trend.upsert(MonthlyTrendPoint::new(
            self.clock.current_month(),
            overall_score,
            failed,
            pass_rate.round().clamp(0.0, 100.0) as u8,
        ));

        QualityMetrics {
            overall_score,
            pass_rate,
            defect_rate,
            critical_issues,
            total_inspections: total,
            monthly_trends: self.trend.window().to_vec(),
            defect_types,
        }
    }

    /// Category shares in first-occurrence order, or `None` without defects.
    fn defect_distribution(&self) -> Option<Vec<DefectTypeShare>> {
        let mut tally: Vec<(DefectCategory, usize)> = Vec::new();
        for defect in self.inspections.iter().flat_map(|i| &i.defects) {
            match tally.iter_mut().find(|(c, _)| *c == defect.category) {
                Some((_, count)) => *count += 1,
                None => tally.push((defect.category, 1)),
            }
        }

        let total: usize = tally.iter().map(|(_, n)| n).sum();
        if total == 0 {
            return None;
        }

        Some(
            tally
                .into_iter()
                .enumerate()
                .map(|(index, (category, count))| {
                    let share = (100.0 * count as f64 / total as f64).round() as u8;
                    DefectTypeShare::new(category.display_name(), share, index)
                })
                .collect(),
        )
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new(QualityMetrics::seeded())
    }
}

impl fmt::Debug for MetricsAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricsAggregator")
            .field("inspections", &self.inspections.len())
            .field("mode", &self.mode)
            .field("dirty", &self.dirty)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Keeps `issues` equal to the defect count and the score in range.
fn normalize(inspection: &mut Inspection) {
    let reported = inspection.issues;
    if inspection.normalize_issues() {
        warn!(
            "Inspection {} reported {reported} issues but has {} defects; using the defect count",
            inspection.id, inspection.issues
        );
    }
    inspection.score = inspection.score.min(100);
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
