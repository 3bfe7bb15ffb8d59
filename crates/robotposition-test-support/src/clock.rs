//! Test clock: deterministic `Clock` implementation for tests.

use chrono::{DateTime, Utc};
use robotposition_core::clock::Clock;

/// A clock frozen at a single instant, so event timestamps can be asserted.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
