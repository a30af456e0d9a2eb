//! Role registry for weighted governance.
//!
//! Maps accounts to voting roles carrying a tally multiplier. Assignments are
//! managed exclusively by the governing authority, throttled by a global
//! creation cooldown, and read by the tally engine in ascending-id order so
//! every replica aggregates identically.

pub mod error;
pub mod genesis;
pub mod params;
pub mod registry;
pub mod role;

pub use error::RoleError;
pub use genesis::GenesisState;
pub use params::RegistryParams;
pub use registry::RoleRegistry;
pub use role::{RoleAssignment, RoleKind, MAX_MULTIPLIER, MIN_MULTIPLIER};
