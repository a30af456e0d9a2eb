//! Weighted governance tally.
//!
//! At the end of a voting period the host's finalization logic hands the
//! engine a finalized vote set; the engine aggregates each role-holding
//! voter's delegated stake, scales it by the account's role multiplier, and
//! produces per-option totals. Quorum and pass/fail decisions stay with the
//! host; this crate only computes the weighted totals.

pub mod engine;
pub mod error;
pub mod staking;
pub mod vote;

pub use engine::WeightedTallyEngine;
pub use error::TallyError;
pub use staking::{Delegation, StakingView, StakingViewError, ValidatorRecord};
pub use vote::{TallyResult, VoteOption, VoteSet};
