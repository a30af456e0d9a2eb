use concord_vesting::StakeGuardError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("vesting validation failed: {0}")]
    Admission(#[from] StakeGuardError),

    #[error("{0}")]
    Other(String),
}
