//! The transaction-admission adapter for the vesting guard.

use crate::error::HookError;
use crate::tx::StakingTx;
use concord_types::Timestamp;
use concord_vesting::{AccountLookup, GuardParams, StakeGuard};

/// Gates staking transactions on vesting eligibility before any state
/// mutation.
///
/// Runs once per transaction at admission time. Delegations and
/// redelegations increase (or move) bonded stake and go through the guard;
/// undelegations only release stake and pass untouched.
pub struct TransactionGuard {
    guard: StakeGuard,
}

impl TransactionGuard {
    pub fn new(params: GuardParams) -> Self {
        Self {
            guard: StakeGuard::new(params),
        }
    }

    /// The underlying eligibility guard, for query surfaces that share it.
    pub fn stake_guard(&self) -> &StakeGuard {
        &self.guard
    }

    /// Admit or reject one staking transaction against current pre-state.
    pub fn validate(
        &self,
        accounts: &dyn AccountLookup,
        tx: &StakingTx,
        now: Timestamp,
    ) -> Result<(), HookError> {
        match tx {
            StakingTx::Delegate {
                delegator, amount, ..
            }
            | StakingTx::Redelegate {
                delegator, amount, ..
            } => {
                self.guard
                    .validate_stake_request(accounts, delegator, amount, now)?;
                Ok(())
            }
            StakingTx::Undelegate { .. } => Ok(()),
        }
    }
}

impl Default for TransactionGuard {
    fn default() -> Self {
        Self::new(GuardParams::default())
    }
}
