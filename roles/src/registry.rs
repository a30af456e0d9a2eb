//! The role registry — authority-gated CRUD over role assignments.

use crate::error::RoleError;
use crate::params::RegistryParams;
use crate::role::{RoleAssignment, RoleKind, MAX_MULTIPLIER, MIN_MULTIPLIER};
use concord_store::RoleStore;
use concord_types::{Account, Decimal, Timestamp};
use std::collections::BTreeMap;

const NEXT_ROLE_ID_KEY: &[u8] = b"next_role_id";
const LAST_CREATION_KEY: &[u8] = b"last_role_creation_time";
const PARAMS_KEY: &[u8] = b"registry_params";

/// The role registry.
///
/// Assignments are keyed by their sequential id in a `BTreeMap`, so every
/// scan (lookup, stats, tally iteration) runs in ascending-id order on every
/// replica. All writes happen synchronously within one transaction's
/// admission under the host's single-threaded execution model.
pub struct RoleRegistry {
    authority: Account,
    params: RegistryParams,
    next_id: u64,
    assignments: BTreeMap<u64, RoleAssignment>,
    /// Shared timer behind the creation rate limiter. Explicit state so
    /// genesis, persistence, and tests all see and set the same value.
    last_role_creation_time: Option<Timestamp>,
}

impl RoleRegistry {
    pub fn new(authority: Account, params: RegistryParams) -> Self {
        Self {
            authority,
            params,
            next_id: 0,
            assignments: BTreeMap::new(),
            last_role_creation_time: None,
        }
    }

    /// The governing authority account.
    pub fn authority(&self) -> &Account {
        &self.authority
    }

    pub fn params(&self) -> &RegistryParams {
        &self.params
    }

    /// Replace the registry parameters. Authority-gated like every write.
    pub fn set_params(&mut self, caller: &Account, params: RegistryParams) -> Result<(), RoleError> {
        self.check_authority(caller)?;
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Timestamp of the most recent successful creation, if any.
    pub fn last_role_creation_time(&self) -> Option<Timestamp> {
        self.last_role_creation_time
    }

    /// The next id the sequence will allocate.
    pub fn next_role_id(&self) -> u64 {
        self.next_id
    }

    /// Bulk-restore state from genesis. Bypasses per-write validation; the
    /// caller has already validated the snapshot as a whole.
    pub(crate) fn restore(
        &mut self,
        assignments: BTreeMap<u64, RoleAssignment>,
        next_id: u64,
        last_role_creation_time: Option<Timestamp>,
    ) {
        self.assignments = assignments;
        self.next_id = next_id;
        self.last_role_creation_time = last_role_creation_time;
    }

    /// Create a role assignment for `account`.
    ///
    /// Checks, in order: caller authority, the global creation cooldown,
    /// role and multiplier validity, and the per-account cap. On success the
    /// assignment gets the next sequential id (never reused) and the shared
    /// cooldown timer is stamped with `now`.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        caller: &Account,
        account: Account,
        role: &str,
        multiplier: &str,
        assigned_at: Timestamp,
        assigned_by: Account,
        now: Timestamp,
    ) -> Result<u64, RoleError> {
        self.check_authority(caller)?;
        self.check_creation_cooldown(now)?;
        let kind = validate_fields(role, multiplier)?;

        let held = self.count_for_account(&account);
        if held >= self.params.max_roles_per_address {
            return Err(RoleError::RoleLimitExceeded {
                account,
                max: self.params.max_roles_per_address,
            });
        }

        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| RoleError::Internal("role id space exhausted".to_string()))?;

        self.assignments.insert(
            id,
            RoleAssignment {
                id,
                account,
                role: kind,
                multiplier: multiplier.to_string(),
                assigned_at,
                assigned_by,
            },
        );
        self.last_role_creation_time = Some(now);

        tracing::info!(
            role_id = id,
            account = %account,
            role = %kind,
            multiplier,
            assigned_by = %assigned_by,
            "role assignment created"
        );
        Ok(id)
    }

    /// Replace an existing assignment wholesale.
    ///
    /// Re-runs authority and field validation, but not the creation cooldown
    /// or the per-account cap: an update does not occupy a new slot.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        caller: &Account,
        id: u64,
        account: Account,
        role: &str,
        multiplier: &str,
        assigned_at: Timestamp,
        assigned_by: Account,
    ) -> Result<(), RoleError> {
        self.check_authority(caller)?;
        let kind = validate_fields(role, multiplier)?;

        if !self.assignments.contains_key(&id) {
            return Err(RoleError::NotFound(id));
        }
        self.assignments.insert(
            id,
            RoleAssignment {
                id,
                account,
                role: kind,
                multiplier: multiplier.to_string(),
                assigned_at,
                assigned_by,
            },
        );

        tracing::info!(
            role_id = id,
            account = %account,
            role = %kind,
            multiplier,
            updated_by = %caller,
            "role assignment updated"
        );
        Ok(())
    }

    /// Delete an assignment, removing the account's mapping.
    pub fn remove(&mut self, caller: &Account, id: u64) -> Result<(), RoleError> {
        self.check_authority(caller)?;
        let removed = self
            .assignments
            .remove(&id)
            .ok_or(RoleError::NotFound(id))?;

        tracing::info!(
            role_id = id,
            account = %removed.account,
            removed_by = %caller,
            "role assignment removed"
        );
        Ok(())
    }

    /// The assignment with the given id.
    pub fn get(&self, id: u64) -> Option<&RoleAssignment> {
        self.assignments.get(&id)
    }

    /// The account's assignment, if any.
    ///
    /// Linear scan in ascending-id order: with a cap above 1 an account may
    /// hold several assignments, and the lowest id wins deterministically.
    pub fn lookup_by_account(&self, account: &Account) -> Option<&RoleAssignment> {
        self.assignments.values().find(|a| a.account == *account)
    }

    pub fn has_role(&self, account: &Account) -> bool {
        self.lookup_by_account(account).is_some()
    }

    /// The tally multiplier for an account.
    ///
    /// Never fails: accounts without an assignment weigh 1.0, and a stored
    /// multiplier that no longer parses falls back to 1.0 as well. The
    /// fallback is logged, since it only happens on corrupted state, but
    /// the substitution itself stays: the tally must make forward progress
    /// over whatever state it finds.
    pub fn multiplier_for(&self, account: &Account) -> Decimal {
        let Some(assignment) = self.lookup_by_account(account) else {
            return Decimal::ONE;
        };
        match assignment.multiplier_decimal() {
            Some(multiplier) => multiplier,
            None => {
                tracing::warn!(
                    role_id = assignment.id,
                    account = %account,
                    multiplier = %assignment.multiplier,
                    "stored multiplier is not a valid decimal, substituting 1.0"
                );
                Decimal::ONE
            }
        }
    }

    pub fn count_for_account(&self, account: &Account) -> u32 {
        self.assignments
            .values()
            .filter(|a| a.account == *account)
            .count() as u32
    }

    /// All assignments holding the given role, ascending by id.
    pub fn list_by_role(&self, role: RoleKind) -> Vec<&RoleAssignment> {
        self.assignments
            .values()
            .filter(|a| a.role == role)
            .collect()
    }

    /// Assignment counts per role kind.
    pub fn stats_by_role(&self) -> BTreeMap<RoleKind, u32> {
        let mut stats = BTreeMap::new();
        for assignment in self.assignments.values() {
            *stats.entry(assignment.role).or_insert(0) += 1;
        }
        stats
    }

    /// All assignments, ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = &RoleAssignment> {
        self.assignments.values()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    fn check_authority(&self, caller: &Account) -> Result<(), RoleError> {
        if *caller != self.authority {
            return Err(RoleError::Unauthorized {
                expected: self.authority,
                got: *caller,
            });
        }
        Ok(())
    }

    fn check_creation_cooldown(&self, now: Timestamp) -> Result<(), RoleError> {
        let cooldown = self.params.role_creation_cooldown_secs as u64;
        if cooldown == 0 {
            return Ok(());
        }
        // No prior creation means nothing to throttle against.
        let Some(last) = self.last_role_creation_time else {
            return Ok(());
        };
        let elapsed = last.elapsed_since(now);
        if elapsed < cooldown {
            return Err(RoleError::RateLimited {
                remaining_secs: cooldown - elapsed,
            });
        }
        Ok(())
    }
}

/// Validate the wire form of a role name and multiplier.
fn validate_fields(role: &str, multiplier: &str) -> Result<RoleKind, RoleError> {
    let kind = RoleKind::parse(role).ok_or_else(|| RoleError::InvalidRole(role.to_string()))?;
    let parsed: Decimal = multiplier
        .parse()
        .map_err(|_| RoleError::InvalidMultiplier(multiplier.to_string()))?;
    if parsed < MIN_MULTIPLIER || parsed > MAX_MULTIPLIER {
        return Err(RoleError::InvalidMultiplier(multiplier.to_string()));
    }
    Ok(kind)
}

impl RoleRegistry {
    /// Persist all registry state to a role store.
    pub fn save_to_store(&self, store: &dyn RoleStore) -> Result<(), RoleError> {
        store
            .put_meta(NEXT_ROLE_ID_KEY, &self.next_id.to_be_bytes())
            .map_err(|e| RoleError::Internal(e.to_string()))?;

        if let Some(last) = self.last_role_creation_time {
            store
                .put_meta(LAST_CREATION_KEY, &last.as_secs().to_be_bytes())
                .map_err(|e| RoleError::Internal(e.to_string()))?;
        }

        let params_bytes =
            bincode::serialize(&self.params).map_err(|e| RoleError::Internal(e.to_string()))?;
        store
            .put_meta(PARAMS_KEY, &params_bytes)
            .map_err(|e| RoleError::Internal(e.to_string()))?;

        for (id, assignment) in &self.assignments {
            let bytes =
                bincode::serialize(assignment).map_err(|e| RoleError::Internal(e.to_string()))?;
            store
                .put_role(*id, &bytes)
                .map_err(|e| RoleError::Internal(e.to_string()))?;
        }
        Ok(())
    }

    /// Restore registry state from a role store.
    ///
    /// The authority is host wiring, not chain state, so the caller supplies
    /// it the same way it supplies it to [`RoleRegistry::new`].
    pub fn load_from_store(authority: Account, store: &dyn RoleStore) -> Result<Self, RoleError> {
        let next_id = match store
            .get_meta(NEXT_ROLE_ID_KEY)
            .map_err(|e| RoleError::Internal(e.to_string()))?
        {
            Some(bytes) if bytes.len() >= 8 => u64::from_be_bytes(
                bytes[..8]
                    .try_into()
                    .map_err(|_| RoleError::Internal("bad next_role_id encoding".to_string()))?,
            ),
            _ => 0,
        };

        let last_role_creation_time = match store
            .get_meta(LAST_CREATION_KEY)
            .map_err(|e| RoleError::Internal(e.to_string()))?
        {
            Some(bytes) if bytes.len() >= 8 => Some(Timestamp::new(u64::from_be_bytes(
                bytes[..8].try_into().map_err(|_| {
                    RoleError::Internal("bad last_role_creation_time encoding".to_string())
                })?,
            ))),
            _ => None,
        };

        let params = match store
            .get_meta(PARAMS_KEY)
            .map_err(|e| RoleError::Internal(e.to_string()))?
        {
            Some(bytes) => {
                bincode::deserialize(&bytes).map_err(|e| RoleError::Internal(e.to_string()))?
            }
            None => RegistryParams::default(),
        };

        let mut assignments = BTreeMap::new();
        for (id, bytes) in store
            .iter_roles()
            .map_err(|e| RoleError::Internal(e.to_string()))?
        {
            let assignment: RoleAssignment =
                bincode::deserialize(&bytes).map_err(|e| RoleError::Internal(e.to_string()))?;
            assignments.insert(id, assignment);
        }

        Ok(Self {
            authority,
            params,
            next_id,
            assignments,
            last_role_creation_time,
        })
    }
}
