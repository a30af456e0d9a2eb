//! Registry parameters, set at genesis and governable thereafter.

use crate::error::RoleError;
use serde::{Deserialize, Serialize};

/// Default maximum number of role assignments per account.
pub const DEFAULT_MAX_ROLES_PER_ADDRESS: u32 = 1;

/// Default cooldown between role creations, in seconds (5 minutes).
pub const DEFAULT_ROLE_CREATION_COOLDOWN_SECS: u32 = 300;

/// Global registry configuration.
///
/// The cooldown throttles global role-creation throughput, not per-account
/// throughput: a single shared timer guards every creation. This blunts
/// role-farming without per-account bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryParams {
    /// Maximum concurrent role assignments per account. Must be ≥ 1.
    pub max_roles_per_address: u32,

    /// Seconds that must elapse between two role creations. 0 disables
    /// the rate limiter.
    pub role_creation_cooldown_secs: u32,
}

impl RegistryParams {
    pub fn new(max_roles_per_address: u32, role_creation_cooldown_secs: u32) -> Self {
        Self {
            max_roles_per_address,
            role_creation_cooldown_secs,
        }
    }

    pub fn validate(&self) -> Result<(), RoleError> {
        if self.max_roles_per_address == 0 {
            return Err(RoleError::InvalidParams(
                "max roles per address must be greater than 0".to_string(),
            ));
        }
        // cooldown may be 0 to disable the rate limiter
        Ok(())
    }
}

impl Default for RegistryParams {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_ROLES_PER_ADDRESS,
            DEFAULT_ROLE_CREATION_COOLDOWN_SECS,
        )
    }
}
