//! Role-registry storage trait.

use crate::StoreError;

/// Store trait for persisting role-registry state to durable storage.
///
/// Values are opaque `Vec<u8>` so the store doesn't depend on the
/// `concord-roles` crate (which would create a circular dependency). The
/// registry serializes/deserializes its own types.
pub trait RoleStore {
    fn get_role(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_role(&self, id: u64, data: &[u8]) -> Result<(), StoreError>;
    fn delete_role(&self, id: u64) -> Result<(), StoreError>;
    /// All stored assignments in ascending-id order.
    fn iter_roles(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
