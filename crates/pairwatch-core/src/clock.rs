//! Source of "today" for lookback range computation.

use time::{Date, OffsetDateTime};

/// Supplies the current UTC calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Wall-clock UTC date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().date()
    }
}

/// Pinned date for deterministic runs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
