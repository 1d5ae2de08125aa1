//! Timestamp type used throughout the subsystem.
//!
//! Timestamps are Unix epoch seconds (UTC). Staking never reads the wall
//! clock: all term arithmetic uses the head block time so every node computes
//! the same result.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds in one staking day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub const fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since this timestamp (relative to `now`), zero if `now` is earlier.
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Absolute distance in seconds between two timestamps.
    pub fn abs_diff(&self, other: Timestamp) -> u64 {
        self.0.abs_diff(other.0)
    }

    /// Whole days elapsed since this timestamp, floored.
    pub fn elapsed_days_since(&self, now: Timestamp) -> u64 {
        self.elapsed_since(now) / SECONDS_PER_DAY
    }

    pub fn saturating_add_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    pub fn saturating_add_days(&self, days: u64) -> Self {
        self.saturating_add_secs(days.saturating_mul(SECONDS_PER_DAY))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_days_floors() {
        let start = Timestamp::new(1_000);
        assert_eq!(start.elapsed_days_since(Timestamp::new(1_000)), 0);
        assert_eq!(
            start.elapsed_days_since(Timestamp::new(1_000 + SECONDS_PER_DAY - 1)),
            0
        );
        assert_eq!(
            start.elapsed_days_since(Timestamp::new(1_000 + SECONDS_PER_DAY)),
            1
        );
    }

    #[test]
    fn elapsed_days_saturates_for_future_start() {
        let start = Timestamp::new(5_000);
        assert_eq!(start.elapsed_days_since(Timestamp::new(4_000)), 0);
    }

    #[test]
    fn abs_diff_is_symmetric() {
        let a = Timestamp::new(10);
        let b = Timestamp::new(25);
        assert_eq!(a.abs_diff(b), 15);
        assert_eq!(b.abs_diff(a), 15);
    }
}
