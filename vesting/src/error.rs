use thiserror::Error;

#[derive(Debug, Error)]
pub enum StakeGuardError {
    #[error("invalid delegator address: {0}")]
    InvalidAddress(String),

    #[error("account {0} not found")]
    AccountNotFound(String),

    #[error("insufficient vested balance: requested {requested}{denom}, available {available}{denom}")]
    InsufficientVestedBalance {
        requested: u128,
        available: u128,
        denom: String,
    },

    #[error("invalid stake denomination")]
    InvalidStakeDenom,
}
