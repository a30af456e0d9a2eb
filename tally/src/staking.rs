//! Read-only view of the host staking subsystem.

use concord_types::{Account, Decimal, ValidatorId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stake commitment from an account to a validator, denominated in
/// validator shares. Owned by the host staking subsystem; read-only here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub delegator: Account,
    pub validator: ValidatorId,
    pub shares: Decimal,
}

/// What the tally needs to know about a validator: its bonded token pool
/// and the share supply that pool is divided into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorRecord {
    pub id: ValidatorId,
    pub tokens: u128,
    pub delegator_shares: Decimal,
}

impl ValidatorRecord {
    /// Convert a share amount into tokens: `shares * tokens / total_shares`,
    /// floored. A validator with no shares outstanding converts to zero.
    pub fn tokens_from_shares(&self, shares: Decimal) -> Decimal {
        let Some(tokens) = Decimal::from_int(self.tokens) else {
            return Decimal::ZERO;
        };
        shares
            .checked_mul(tokens)
            .and_then(|scaled| scaled.checked_div(self.delegator_shares))
            .unwrap_or(Decimal::ZERO)
    }
}

/// Failures surfaced by the host staking view.
#[derive(Debug, Error)]
pub enum StakingViewError {
    #[error("validator {0} not found")]
    ValidatorNotFound(ValidatorId),

    #[error("staking query failed: {0}")]
    Query(String),
}

/// Host-provided staking queries consumed by the tally engine.
pub trait StakingView {
    /// Total tokens bonded across all validators. A failure here is fatal
    /// to the tally that requested it.
    fn total_bonded_tokens(&self) -> Result<u128, StakingViewError>;

    /// The account's delegations, at most `page_size` of them.
    fn delegations_of(
        &self,
        delegator: &Account,
        page_size: u32,
    ) -> Result<Vec<Delegation>, StakingViewError>;

    fn validator(&self, id: &ValidatorId) -> Result<ValidatorRecord, StakingViewError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_tokens_from_shares_at_par() {
        let validator = ValidatorRecord {
            id: ValidatorId::new("val-1"),
            tokens: 1000,
            delegator_shares: dec("1000"),
        };
        assert_eq!(validator.tokens_from_shares(dec("100")).truncate(), 100);
    }

    #[test]
    fn test_tokens_from_shares_after_slash() {
        // 900 tokens backing 1000 shares: each share is worth 0.9 tokens.
        let validator = ValidatorRecord {
            id: ValidatorId::new("val-1"),
            tokens: 900,
            delegator_shares: dec("1000"),
        };
        assert_eq!(validator.tokens_from_shares(dec("100")).truncate(), 90);
        assert_eq!(validator.tokens_from_shares(dec("1")), dec("0.9"));
    }

    #[test]
    fn test_zero_share_supply_converts_to_zero() {
        let validator = ValidatorRecord {
            id: ValidatorId::new("val-1"),
            tokens: 1000,
            delegator_shares: Decimal::ZERO,
        };
        assert!(validator.tokens_from_shares(dec("100")).is_zero());
    }
}
