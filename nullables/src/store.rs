//! Nullable store — thread-safe in-memory role storage for testing.

use concord_store::{RoleStore, StoreError};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// An in-memory [`RoleStore`].
///
/// Roles live in a `BTreeMap` so `iter_roles` returns ascending ids like a
/// real ordered KV backend would.
pub struct NullRoleStore {
    roles: Mutex<BTreeMap<u64, Vec<u8>>>,
    meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl NullRoleStore {
    pub fn new() -> Self {
        Self {
            roles: Mutex::new(BTreeMap::new()),
            meta: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for NullRoleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleStore for NullRoleStore {
    fn get_role(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.roles.lock().unwrap().get(&id).cloned())
    }

    fn put_role(&self, id: u64, data: &[u8]) -> Result<(), StoreError> {
        self.roles.lock().unwrap().insert(id, data.to_vec());
        Ok(())
    }

    fn delete_role(&self, id: u64) -> Result<(), StoreError> {
        self.roles.lock().unwrap().remove(&id);
        Ok(())
    }

    fn iter_roles(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .map(|(id, data)| (*id, data.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meta
            .lock()
            .unwrap()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
