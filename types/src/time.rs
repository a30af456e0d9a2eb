//! Timestamp type used throughout the policy layer.
//!
//! Timestamps are Unix epoch seconds (UTC). The policy crates never read the
//! wall clock: every operation takes the block's canonical timestamp as an
//! argument, so all validating replicas compute from identical time.

use serde::{Deserialize, Serialize};
use std::fmt;

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

    /// Seconds elapsed since this timestamp (relative to `now`).
    ///
    /// Saturates at zero when `now` is earlier than `self`.
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether this timestamp + duration has passed relative to `now`.
    pub fn has_expired(&self, duration_secs: u64, now: Timestamp) -> bool {
        now.0 >= self.0.saturating_add(duration_secs)
    }

    /// This timestamp shifted forward, saturating at `u64::MAX`.
    pub fn saturating_add_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
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
    fn test_elapsed_saturates() {
        let t = Timestamp::new(1000);
        assert_eq!(t.elapsed_since(Timestamp::new(1300)), 300);
        assert_eq!(t.elapsed_since(Timestamp::new(500)), 0);
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let t = Timestamp::new(1000);
        assert!(!t.has_expired(300, Timestamp::new(1299)));
        assert!(t.has_expired(300, Timestamp::new(1300)));
        assert!(t.has_expired(300, Timestamp::new(1301)));
    }
}
