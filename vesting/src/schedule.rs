//! Vesting schedules — time-based unlock curves.
//!
//! All curve arithmetic is deterministic integer math over the block
//! timestamp. `vested_coins` is monotonically non-decreasing in time,
//! bounded by the original allocation, and reaches it once the schedule
//! completes.

use concord_types::{Coin, Coins, Timestamp};
use serde::{Deserialize, Serialize};

/// One stage of a periodic schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Seconds from the end of the previous period (or the schedule start).
    pub length_secs: u64,
    /// Coins unlocked when this period completes.
    pub amount: Coins,
}

/// The unlock curve shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleKind {
    /// Linear unlock between `start` and `end`.
    Continuous { start: Timestamp, end: Timestamp },
    /// Everything unlocks at once at `end`.
    Delayed { end: Timestamp },
    /// Staged unlock: each period's amount unlocks when the period elapses.
    Periodic { start: Timestamp, periods: Vec<Period> },
}

/// A vesting schedule: an original locked allocation and an unlock curve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSchedule {
    pub original: Coins,
    pub kind: ScheduleKind,
}

impl VestingSchedule {
    pub fn continuous(original: Coins, start: Timestamp, end: Timestamp) -> Self {
        Self {
            original,
            kind: ScheduleKind::Continuous { start, end },
        }
    }

    pub fn delayed(original: Coins, end: Timestamp) -> Self {
        Self {
            original,
            kind: ScheduleKind::Delayed { end },
        }
    }

    pub fn periodic(original: Coins, start: Timestamp, periods: Vec<Period>) -> Self {
        Self {
            original,
            kind: ScheduleKind::Periodic { start, periods },
        }
    }

    /// Coins unlocked as of the given time.
    pub fn vested_coins(&self, as_of: Timestamp) -> Coins {
        match &self.kind {
            ScheduleKind::Continuous { start, end } => {
                if as_of < *start {
                    return Coins::new();
                }
                if as_of >= *end {
                    return self.original.clone();
                }
                // end > as_of >= start here, so the duration is nonzero.
                let elapsed = start.elapsed_since(as_of);
                let duration = start.elapsed_since(*end);
                Coins::from_coins(self.original.iter().map(|c| Coin {
                    denom: c.denom.clone(),
                    amount: scale(c.amount, elapsed, duration),
                }))
            }
            ScheduleKind::Delayed { end } => {
                if as_of >= *end {
                    self.original.clone()
                } else {
                    Coins::new()
                }
            }
            ScheduleKind::Periodic { start, periods } => {
                let mut boundary = *start;
                let mut vested = Vec::new();
                for period in periods {
                    boundary = boundary.saturating_add_secs(period.length_secs);
                    if as_of < boundary {
                        break;
                    }
                    vested.extend(period.amount.iter().cloned());
                }
                Coins::from_coins(vested)
            }
        }
    }

    /// Coins still locked as of the given time.
    pub fn vesting_coins(&self, as_of: Timestamp) -> Coins {
        self.original.saturating_sub(&self.vested_coins(as_of))
    }
}

/// `amount * elapsed / duration` with floor semantics, split so the
/// intermediate product cannot overflow for any realistic token supply.
fn scale(amount: u128, elapsed: u64, duration: u64) -> u128 {
    let elapsed = elapsed as u128;
    let duration = duration as u128;
    let q = amount / duration;
    let r = amount % duration;
    q * elapsed + r * elapsed / duration
}
