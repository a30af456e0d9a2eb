//! Abstract storage traits for the Concord policy layer.
//!
//! Every storage backend (the host chain's KV store, in-memory for testing)
//! implements these traits. The policy crates depend only on the traits and
//! serialize their own types, so no backend ever links against domain code.

pub mod error;
pub mod role;

pub use error::StoreError;
pub use role::RoleStore;
