//! Adapters between the host pipelines and the policy engines.
//!
//! The host governance pipeline emits lifecycle notifications; the host
//! transaction router submits staking transactions for admission. Neither
//! knows about roles or vesting, so these adapters forward both streams
//! into the policy crates.

pub mod error;
pub mod gov;
pub mod guard;
pub mod tx;

pub use error::HookError;
pub use gov::{GovernanceHooks, MultiplierHooks, NoopHooks};
pub use guard::TransactionGuard;
pub use tx::StakingTx;
