//! Nullable infrastructure for deterministic testing.
//!
//! The policy crates consume their surroundings (block time, storage,
//! account records, staking state) through arguments and traits. This
//! crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap host implementations for nullables in tests.

pub mod accounts;
pub mod clock;
pub mod staking;
pub mod store;

pub use accounts::NullAccountLookup;
pub use clock::NullClock;
pub use staking::NullStakingView;
pub use store::NullRoleStore;
