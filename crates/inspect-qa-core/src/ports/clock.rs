//! Time source port.

use time::OffsetDateTime;

use crate::domain::month_label;

/// Port for reading the current time.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> OffsetDateTime;

    /// Short label of the current month ("Jan".."Dec").
    fn current_month(&self) -> &'static str {
        month_label(self.now().month())
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
