//! Deterministic clock for tests.

use chrono::{DateTime, Utc};
use novella_core::clock::Clock;

/// A clock pinned to one point in time, so save timestamps are
/// predictable in assertions.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
