//! Account records and the host-side account lookup interface.

use crate::schedule::VestingSchedule;
use concord_types::Account;
use serde::{Deserialize, Serialize};

/// What the guard needs to know about an account.
///
/// Whether an account is restricted is decided by the *presence* of a
/// vesting schedule, not by an account kind: a record with `vesting: None`
/// is an ordinary account however it was created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub address: Account,
    pub vesting: Option<VestingSchedule>,
}

impl AccountRecord {
    pub fn new(address: Account) -> Self {
        Self {
            address,
            vesting: None,
        }
    }

    pub fn with_vesting(address: Account, schedule: VestingSchedule) -> Self {
        Self {
            address,
            vesting: Some(schedule),
        }
    }

    pub fn is_vesting(&self) -> bool {
        self.vesting.is_some()
    }
}

/// Host-provided account resolution.
///
/// Implemented by the host ledger's account store; the guard only reads.
pub trait AccountLookup {
    fn get_account(&self, address: &Account) -> Option<AccountRecord>;
}
