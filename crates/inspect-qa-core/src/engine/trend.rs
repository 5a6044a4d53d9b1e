//! Bounded monthly trend series.

use crate::domain::MonthlyTrendPoint;

/// Maximum number of points kept in the window.
pub const TREND_WINDOW_LEN: usize = 6;

/// Insertion-ordered monthly points, at most one per month label.
///
/// Eviction follows insertion order, not calendar distance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendWindow {
    points: Vec<MonthlyTrendPoint>,
}

impl TrendWindow {
    /// Creates an empty window.
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Creates a window seeded with `defaults`.
    #[must_use]
    pub fn seeded(defaults: &[MonthlyTrendPoint]) -> Self {
        let mut window = Self::new();
        window.seed(defaults);
        window
    }

    /// Replaces the contents with `defaults`.
    ///
    /// Later duplicates of a month replace earlier ones, and only the last
    /// six points are kept.
    pub fn seed(&mut self, defaults: &[MonthlyTrendPoint]) {
        self.points.clear();
        for point in defaults {
            self.upsert(point.clone());
        }
    }

    /// Replaces the point for `point.month` in place, or appends it.
    pub fn upsert(&mut self, point: MonthlyTrendPoint) {
        if let Some(existing) = self.points.iter_mut().find(|p| p.month == point.month) {
            *existing = point;
            return;
        }
        self.points.push(point);
        if self.points.len() > TREND_WINDOW_LEN {
            let excess = self.points.len() - TREND_WINDOW_LEN;
            self.points.drain(..excess);
        }
    }

    /// The retained points, oldest first.
    #[must_use]
    pub fn window(&self) -> &[MonthlyTrendPoint] {
        &self.points
    }

    /// Number of retained points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no point is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
