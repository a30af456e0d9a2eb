//! The governance-lifecycle adapter.

use crate::error::HookError;
use concord_roles::RoleRegistry;
use concord_types::Account;

/// Lifecycle notifications from the host governance pipeline.
///
/// Every method defaults to a no-op so implementors only write the stages
/// they care about.
pub trait GovernanceHooks {
    fn on_proposal_submitted(&self, _proposal_id: u64) -> Result<(), HookError> {
        Ok(())
    }

    fn on_proposal_deposit(
        &self,
        _proposal_id: u64,
        _depositor: &Account,
    ) -> Result<(), HookError> {
        Ok(())
    }

    fn on_vote_cast(&self, _proposal_id: u64, _voter: &Account) -> Result<(), HookError> {
        Ok(())
    }

    fn on_proposal_failed_min_deposit(&self, _proposal_id: u64) -> Result<(), HookError> {
        Ok(())
    }

    fn on_voting_period_ended(&self, _proposal_id: u64) -> Result<(), HookError> {
        Ok(())
    }
}

/// Hooks that do nothing; the default inner layer of [`MultiplierHooks`].
pub struct NoopHooks;

impl GovernanceHooks for NoopHooks {}

/// Wraps a downstream hook implementation and attaches multiplier
/// bookkeeping: when a vote lands, the voter's effective multiplier is
/// resolved and emitted so indexers can explain the eventual tally.
///
/// Every notification is forwarded to the inner hooks exactly once,
/// whether or not this layer did anything with it.
pub struct MultiplierHooks<'r, H = NoopHooks> {
    registry: &'r RoleRegistry,
    inner: H,
}

impl<'r> MultiplierHooks<'r> {
    pub fn new(registry: &'r RoleRegistry) -> Self {
        Self {
            registry,
            inner: NoopHooks,
        }
    }
}

impl<'r, H: GovernanceHooks> MultiplierHooks<'r, H> {
    pub fn wrapping(registry: &'r RoleRegistry, inner: H) -> Self {
        Self { registry, inner }
    }
}

impl<H: GovernanceHooks> GovernanceHooks for MultiplierHooks<'_, H> {
    fn on_proposal_submitted(&self, proposal_id: u64) -> Result<(), HookError> {
        self.inner.on_proposal_submitted(proposal_id)
    }

    fn on_proposal_deposit(
        &self,
        proposal_id: u64,
        depositor: &Account,
    ) -> Result<(), HookError> {
        self.inner.on_proposal_deposit(proposal_id, depositor)
    }

    fn on_vote_cast(&self, proposal_id: u64, voter: &Account) -> Result<(), HookError> {
        let multiplier = self.registry.multiplier_for(voter);
        tracing::info!(
            proposal_id,
            voter = %voter,
            multiplier = %multiplier,
            "vote multiplier applied"
        );
        self.inner.on_vote_cast(proposal_id, voter)
    }

    fn on_proposal_failed_min_deposit(&self, proposal_id: u64) -> Result<(), HookError> {
        self.inner.on_proposal_failed_min_deposit(proposal_id)
    }

    fn on_voting_period_ended(&self, proposal_id: u64) -> Result<(), HookError> {
        self.inner.on_voting_period_ended(proposal_id)
    }
}
