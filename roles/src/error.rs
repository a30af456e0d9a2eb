use concord_types::Account;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoleError {
    #[error("only the governing authority can manage role assignments; expected {expected}, got {got}")]
    Unauthorized { expected: Account, got: Account },

    #[error("role assignment {0} not found")]
    NotFound(u64),

    #[error("invalid role {0:?}: valid roles are core_contributor, validator, community_member, strategic_partner")]
    InvalidRole(String),

    #[error("invalid multiplier {0:?}: must be a decimal between 0.1 and 10.0")]
    InvalidMultiplier(String),

    #[error("account {account} already has the maximum number of roles ({max})")]
    RoleLimitExceeded { account: Account, max: u32 },

    #[error("role creation is rate limited: {remaining_secs} seconds remaining")]
    RateLimited { remaining_secs: u64 },

    #[error("invalid registry params: {0}")]
    InvalidParams(String),

    #[error("invalid genesis state: {0}")]
    InvalidGenesis(String),

    #[error("internal error: {0}")]
    Internal(String),
}
