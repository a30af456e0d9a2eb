//! Genesis import/export for the role registry.

use crate::error::RoleError;
use crate::params::RegistryParams;
use crate::registry::RoleRegistry;
use crate::role::RoleAssignment;
use concord_types::{Account, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The registry's portion of the chain genesis file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: RegistryParams,
    pub roles: Vec<RoleAssignment>,
    /// The id sequence position: one past the highest id ever allocated.
    pub role_count: u64,
    /// Rate-limiter state carried across export/import so a restart cannot
    /// be used to sidestep the cooldown.
    pub last_role_creation_time: Option<Timestamp>,
}

impl GenesisState {
    pub fn validate(&self) -> Result<(), RoleError> {
        self.params.validate()?;

        let mut seen = BTreeMap::new();
        for role in &self.roles {
            if let Some(prev) = seen.insert(role.id, &role.account) {
                return Err(RoleError::InvalidGenesis(format!(
                    "duplicate role id {} (held by {} and {})",
                    role.id, prev, role.account
                )));
            }
            if role.id >= self.role_count {
                return Err(RoleError::InvalidGenesis(format!(
                    "role id {} is outside the allocated sequence (role_count {})",
                    role.id, self.role_count
                )));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, RoleError> {
        serde_json::to_string_pretty(self).map_err(|e| RoleError::Internal(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, RoleError> {
        serde_json::from_str(raw).map_err(|e| RoleError::InvalidGenesis(e.to_string()))
    }
}

impl Default for GenesisState {
    fn default() -> Self {
        Self {
            params: RegistryParams::default(),
            roles: Vec::new(),
            role_count: 0,
            last_role_creation_time: None,
        }
    }
}

impl RoleRegistry {
    /// Initialize a registry from genesis state.
    pub fn from_genesis(authority: Account, genesis: GenesisState) -> Result<Self, RoleError> {
        genesis.validate()?;
        let mut registry = Self::new(authority, genesis.params);
        registry.restore(
            genesis.roles.into_iter().map(|r| (r.id, r)).collect(),
            genesis.role_count,
            genesis.last_role_creation_time,
        );
        Ok(registry)
    }

    /// Export the registry's full state for a genesis file.
    pub fn export_genesis(&self) -> GenesisState {
        GenesisState {
            params: self.params().clone(),
            roles: self.iter().cloned().collect(),
            role_count: self.next_role_id(),
            last_role_creation_time: self.last_role_creation_time(),
        }
    }
}
