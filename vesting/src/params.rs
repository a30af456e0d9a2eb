//! Guard parameters.

use crate::error::StakeGuardError;
use serde::{Deserialize, Serialize};

/// Default denomination of the network's native staking token.
pub const DEFAULT_STAKE_DENOM: &str = "stake";

/// Guard configuration: which denomination the vesting restriction covers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardParams {
    /// The native staking denomination. Stake requests in any other denom
    /// pass the guard unconditionally.
    pub stake_denom: String,
}

impl GuardParams {
    pub fn new(stake_denom: impl Into<String>) -> Self {
        Self {
            stake_denom: stake_denom.into(),
        }
    }

    pub fn validate(&self) -> Result<(), StakeGuardError> {
        if self.stake_denom.is_empty() {
            return Err(StakeGuardError::InvalidStakeDenom);
        }
        Ok(())
    }
}

impl Default for GuardParams {
    fn default() -> Self {
        Self::new(DEFAULT_STAKE_DENOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = GuardParams::default();
        assert_eq!(params.stake_denom, "stake");
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_empty_denom_rejected() {
        assert!(GuardParams::new("").validate().is_err());
    }
}
