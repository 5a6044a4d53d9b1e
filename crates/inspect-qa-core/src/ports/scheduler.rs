//! Deferred recompute hook.

/// Port notified when a deferred recompute becomes pending.
///
/// Called at most once per pending recompute: further mutations before the
/// host flushes do not call it again. The host is expected to call
/// `MetricsAggregator::flush` on its next turn.
pub trait RecomputeScheduler: Send + Sync {
    /// Requests a flush on the next scheduling turn.
    fn schedule(&self);
}

/// Scheduler for hosts that flush explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScheduler;

impl RecomputeScheduler for NoopScheduler {
    fn schedule(&self) {}
}
