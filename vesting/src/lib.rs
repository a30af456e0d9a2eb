//! Vesting-aware staking restrictions.
//!
//! An account holding a vesting schedule may only stake what its schedule
//! has already unlocked. The guard here is the hard gate evaluated at
//! transaction admission; it is a pure function of ledger state and the
//! block timestamp, so every validating replica reaches the same decision.

pub mod account;
pub mod error;
pub mod guard;
pub mod params;
pub mod schedule;

pub use account::{AccountLookup, AccountRecord};
pub use error::StakeGuardError;
pub use guard::{StakeGuard, StakingEligibility, VestingInfo};
pub use params::GuardParams;
pub use schedule::{Period, ScheduleKind, VestingSchedule};
