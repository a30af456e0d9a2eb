//! Staking transactions as they arrive from the host router.
//!
//! Fields are carried in wire form (address strings); decoding them is part
//! of admission, so a malformed delegator address is a rejection, not a
//! panic.

use concord_types::Coin;

/// A stake-affecting transaction awaiting admission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StakingTx {
    /// New delegation: moves liquid tokens into a validator's bond.
    Delegate {
        delegator: String,
        validator: String,
        amount: Coin,
    },
    /// Moves an existing bond between validators.
    Redelegate {
        delegator: String,
        src_validator: String,
        dst_validator: String,
        amount: Coin,
    },
    /// Unbonds tokens. Never increases stake, so the vesting guard does not
    /// apply.
    Undelegate {
        delegator: String,
        validator: String,
        amount: Coin,
    },
}

impl StakingTx {
    pub fn delegator(&self) -> &str {
        match self {
            Self::Delegate { delegator, .. }
            | Self::Redelegate { delegator, .. }
            | Self::Undelegate { delegator, .. } => delegator,
        }
    }
}
