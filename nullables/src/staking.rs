//! Nullable staking view.

use concord_tally::{Delegation, StakingView, StakingViewError, ValidatorRecord};
use concord_types::{Account, Decimal, ValidatorId};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory [`StakingView`] with scriptable failures.
pub struct NullStakingView {
    total_bonded: Mutex<Result<u128, String>>,
    delegations: Mutex<HashMap<Account, Vec<Delegation>>>,
    validators: Mutex<HashMap<ValidatorId, ValidatorRecord>>,
}

impl NullStakingView {
    pub fn new() -> Self {
        Self {
            total_bonded: Mutex::new(Ok(0)),
            delegations: Mutex::new(HashMap::new()),
            validators: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_total_bonded(&self, tokens: u128) {
        *self.total_bonded.lock().unwrap() = Ok(tokens);
    }

    /// Make the bonded-total lookup fail, which aborts any tally.
    pub fn break_total_bonded(&self, reason: impl Into<String>) {
        *self.total_bonded.lock().unwrap() = Err(reason.into());
    }

    /// Register a validator at par: `tokens` bonded, the same number of
    /// shares outstanding.
    pub fn add_validator_at_par(&self, id: ValidatorId, tokens: u128) {
        self.validators.lock().unwrap().insert(
            id.clone(),
            ValidatorRecord {
                id,
                tokens,
                delegator_shares: Decimal::from_int(tokens).unwrap_or(Decimal::ZERO),
            },
        );
    }

    pub fn add_delegation(&self, delegator: Account, validator: ValidatorId, shares: Decimal) {
        self.delegations
            .lock()
            .unwrap()
            .entry(delegator)
            .or_default()
            .push(Delegation {
                delegator,
                validator,
                shares,
            });
    }
}

impl Default for NullStakingView {
    fn default() -> Self {
        Self::new()
    }
}

impl StakingView for NullStakingView {
    fn total_bonded_tokens(&self) -> Result<u128, StakingViewError> {
        self.total_bonded
            .lock()
            .unwrap()
            .clone()
            .map_err(StakingViewError::Query)
    }

    fn delegations_of(
        &self,
        delegator: &Account,
        page_size: u32,
    ) -> Result<Vec<Delegation>, StakingViewError> {
        let mut delegations = self
            .delegations
            .lock()
            .unwrap()
            .get(delegator)
            .cloned()
            .unwrap_or_default();
        delegations.truncate(page_size as usize);
        Ok(delegations)
    }

    fn validator(&self, id: &ValidatorId) -> Result<ValidatorRecord, StakingViewError> {
        self.validators
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StakingViewError::ValidatorNotFound(id.clone()))
    }
}
