//! The staking eligibility guard.
//!
//! Two entry points answer two different questions and both are kept.
//! `check_eligibility` is the informational query: may this account stake
//! at all, under the all-or-nothing rule. `validate_stake_request` is the
//! hard admission gate: may it stake this particular amount, under the
//! partial-availability rule. They are called from different points in the
//! admission pipeline and deliberately do not share a verdict.

use crate::account::AccountLookup;
use crate::error::StakeGuardError;
use crate::params::GuardParams;
use concord_types::{Account, Coin, Coins, Timestamp};

/// Result of the informational eligibility query.
///
/// Never an error: legitimately-absent data (unknown account, malformed
/// address) yields `is_eligible = false` with a reason, keeping "cannot
/// stake right now" distinct from "something is broken".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakingEligibility {
    pub is_eligible: bool,
    pub is_vesting: bool,
    /// Unlocked amount in the stake denomination. Other denominations are
    /// not tracked by this query.
    pub vested_amount: u128,
    /// Still-locked amount in the stake denomination.
    pub vesting_amount: u128,
    pub reason: String,
}

impl StakingEligibility {
    fn ineligible(reason: &str) -> Self {
        Self {
            is_eligible: false,
            is_vesting: false,
            vested_amount: 0,
            vesting_amount: 0,
            reason: reason.to_string(),
        }
    }
}

/// Detailed vesting snapshot for an account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VestingInfo {
    pub is_vesting: bool,
    pub is_fully_vested: bool,
    pub vested: Coins,
    pub vesting: Coins,
    pub original_vesting: Coins,
    pub as_of: Timestamp,
}

/// The vesting eligibility guard.
pub struct StakeGuard {
    params: GuardParams,
}

impl StakeGuard {
    pub fn new(params: GuardParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GuardParams {
        &self.params
    }

    /// Informational query: is this account free to stake, all-or-nothing?
    ///
    /// A vesting account is eligible only once its entire allocation has
    /// unlocked. Amount fields are reported for the stake denomination.
    pub fn check_eligibility(
        &self,
        accounts: &dyn AccountLookup,
        address: &str,
        as_of: Timestamp,
    ) -> StakingEligibility {
        let Ok(account) = Account::parse(address) else {
            return StakingEligibility::ineligible("invalid address format");
        };
        let Some(record) = accounts.get_account(&account) else {
            return StakingEligibility::ineligible("account not found");
        };
        let Some(schedule) = &record.vesting else {
            return StakingEligibility {
                is_eligible: true,
                is_vesting: false,
                vested_amount: 0,
                vesting_amount: 0,
                reason: "non-vesting account".to_string(),
            };
        };

        let vested = schedule.vested_coins(as_of);
        let vesting = schedule.vesting_coins(as_of);
        let denom = &self.params.stake_denom;

        let all_vested = vesting.is_zero() || vested.is_all_gte(&schedule.original);
        StakingEligibility {
            is_eligible: all_vested,
            is_vesting: true,
            vested_amount: vested.amount_of(denom),
            vesting_amount: vesting.amount_of(denom),
            reason: if all_vested {
                "all tokens are vested".to_string()
            } else {
                "tokens are still vesting - staking restricted".to_string()
            },
        }
    }

    /// Hard admission gate for a stake-increasing transaction.
    ///
    /// Rejects only when the request is in the native staking denomination
    /// and exceeds what the account's schedule has unlocked so far. Must be
    /// re-derivable from current ledger state alone, with no caches and no
    /// clock: every replica runs this against the same pre-state and block
    /// time.
    pub fn validate_stake_request(
        &self,
        accounts: &dyn AccountLookup,
        address: &str,
        amount: &Coin,
        now: Timestamp,
    ) -> Result<(), StakeGuardError> {
        let account = Account::parse(address)
            .map_err(|e| StakeGuardError::InvalidAddress(e.to_string()))?;
        let record = accounts
            .get_account(&account)
            .ok_or_else(|| StakeGuardError::AccountNotFound(address.to_string()))?;

        let Some(schedule) = &record.vesting else {
            return Ok(());
        };
        // The restriction covers only the network's native staking token.
        if amount.denom != self.params.stake_denom {
            return Ok(());
        }

        let available = schedule.vested_coins(now).amount_of(&amount.denom);
        if amount.amount > available {
            tracing::debug!(
                account = %account,
                requested = amount.amount,
                available,
                denom = %amount.denom,
                "stake request exceeds vested balance"
            );
            return Err(StakeGuardError::InsufficientVestedBalance {
                requested: amount.amount,
                available,
                denom: amount.denom.clone(),
            });
        }
        Ok(())
    }

    /// Whether the account exists and carries a vesting schedule.
    pub fn is_vesting_account(&self, accounts: &dyn AccountLookup, address: &str) -> bool {
        Account::parse(address)
            .ok()
            .and_then(|account| accounts.get_account(&account))
            .map(|record| record.is_vesting())
            .unwrap_or(false)
    }

    /// Full vesting snapshot for an account.
    pub fn vesting_info(
        &self,
        accounts: &dyn AccountLookup,
        address: &str,
        as_of: Timestamp,
    ) -> Result<VestingInfo, StakeGuardError> {
        let account = Account::parse(address)
            .map_err(|e| StakeGuardError::InvalidAddress(e.to_string()))?;
        let record = accounts
            .get_account(&account)
            .ok_or_else(|| StakeGuardError::AccountNotFound(address.to_string()))?;

        let Some(schedule) = &record.vesting else {
            return Ok(VestingInfo {
                is_vesting: false,
                is_fully_vested: true,
                vested: Coins::new(),
                vesting: Coins::new(),
                original_vesting: Coins::new(),
                as_of,
            });
        };

        let vesting = schedule.vesting_coins(as_of);
        Ok(VestingInfo {
            is_vesting: true,
            is_fully_vested: vesting.is_zero(),
            vested: schedule.vested_coins(as_of),
            vesting,
            original_vesting: schedule.original.clone(),
            as_of,
        })
    }
}

impl Default for StakeGuard {
    fn default() -> Self {
        Self::new(GuardParams::default())
    }
}
