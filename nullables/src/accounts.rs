//! Nullable account lookup.

use concord_types::Account;
use concord_vesting::{AccountLookup, AccountRecord, VestingSchedule};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory [`AccountLookup`] populated programmatically.
pub struct NullAccountLookup {
    accounts: Mutex<HashMap<Account, AccountRecord>>,
}

impl NullAccountLookup {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// Register an ordinary (non-vesting) account.
    pub fn add_account(&self, address: Account) {
        self.accounts
            .lock()
            .unwrap()
            .insert(address, AccountRecord::new(address));
    }

    /// Register an account with a vesting schedule.
    pub fn add_vesting_account(&self, address: Account, schedule: VestingSchedule) {
        self.accounts
            .lock()
            .unwrap()
            .insert(address, AccountRecord::with_vesting(address, schedule));
    }

    /// Drop an account, as if it never existed.
    pub fn remove_account(&self, address: &Account) {
        self.accounts.lock().unwrap().remove(address);
    }
}

impl Default for NullAccountLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountLookup for NullAccountLookup {
    fn get_account(&self, address: &Account) -> Option<AccountRecord> {
        self.accounts.lock().unwrap().get(address).cloned()
    }
}
