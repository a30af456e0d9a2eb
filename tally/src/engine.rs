//! The weighted tally engine.

use crate::error::TallyError;
use crate::staking::StakingView;
use crate::vote::{TallyResult, VoteSet};
use concord_roles::RoleRegistry;
use concord_types::Decimal;

/// Default page size for per-account delegation lookups.
pub const DEFAULT_DELEGATION_PAGE_SIZE: u32 = 100;

/// Computes weighted per-option vote totals for a finalized proposal.
///
/// The engine walks role assignments in ascending-id order, so two replicas
/// with the same registry, vote set, and staking state produce bit-identical
/// results. Per-account failures (unfetchable delegations, missing
/// validators) are swallowed: that account contributes zero and the tally
/// proceeds. Only the total-bonded lookup is fatal.
pub struct WeightedTallyEngine {
    page_size: u32,
}

impl WeightedTallyEngine {
    pub fn new() -> Self {
        Self {
            page_size: DEFAULT_DELEGATION_PAGE_SIZE,
        }
    }

    /// Bound the per-account delegation scan, capping the work one voter
    /// can demand inside a block's execution budget.
    pub fn with_page_size(page_size: u32) -> Self {
        Self { page_size }
    }

    /// Tally the proposal's votes, weighted by role multipliers.
    pub fn tally(
        &self,
        proposal_id: u64,
        votes: &VoteSet,
        roles: &RoleRegistry,
        staking: &dyn StakingView,
    ) -> Result<TallyResult, TallyError> {
        // The host's quorum/threshold math needs the bonded total; if it
        // cannot be read there is nothing meaningful to tally against.
        let total_bonded = staking
            .total_bonded_tokens()
            .map_err(|e| TallyError::TotalBondedUnavailable(e.to_string()))?;

        let mut result = TallyResult::new();

        for assignment in roles.iter() {
            let voter = &assignment.account;
            let Some(option) = votes.get(voter) else {
                continue;
            };

            let delegations = match staking.delegations_of(voter, self.page_size) {
                Ok(delegations) => delegations,
                Err(e) => {
                    tracing::warn!(
                        proposal_id,
                        voter = %voter,
                        error = %e,
                        "skipping voter: delegations unavailable"
                    );
                    continue;
                }
            };

            let mut voting_power = Decimal::ZERO;
            for delegation in &delegations {
                // A validator that cannot be resolved zeroes out that one
                // delegation, not the voter and not the tally.
                let Ok(validator) = staking.validator(&delegation.validator) else {
                    continue;
                };
                let tokens = validator.tokens_from_shares(delegation.shares);
                match voting_power.checked_add(tokens) {
                    Some(sum) => voting_power = sum,
                    None => {
                        tracing::warn!(
                            proposal_id,
                            voter = %voter,
                            "skipping voter: voting power overflow"
                        );
                        voting_power = Decimal::ZERO;
                        break;
                    }
                }
            }

            let multiplier = roles.multiplier_for(voter);
            let Some(weighted) = voting_power.checked_mul(multiplier) else {
                tracing::warn!(
                    proposal_id,
                    voter = %voter,
                    "skipping voter: weighted power overflow"
                );
                continue;
            };

            // The one and only truncation: weighting happens in full
            // decimal precision and rounds down exactly once per voter.
            result.add(option, weighted.truncate());
        }

        tracing::debug!(
            proposal_id,
            total_bonded,
            yes = result.yes,
            no = result.no,
            abstain = result.abstain,
            no_with_veto = result.no_with_veto,
            "weighted tally complete"
        );
        Ok(result)
    }
}

impl Default for WeightedTallyEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staking::{Delegation, StakingViewError, ValidatorRecord};
    use crate::vote::VoteOption;
    use concord_roles::{RegistryParams, RoleRegistry};
    use concord_types::{Account, Timestamp, ValidatorId};
    use std::collections::HashMap;

    fn acct(n: u8) -> Account {
        Account::new([n; 20])
    }

    fn authority() -> Account {
        acct(0xAA)
    }

    struct MemStaking {
        total_bonded: Result<u128, String>,
        delegations: HashMap<Account, Vec<Delegation>>,
        validators: HashMap<ValidatorId, ValidatorRecord>,
        broken_delegators: Vec<Account>,
    }

    impl MemStaking {
        fn new() -> Self {
            Self {
                total_bonded: Ok(1_000_000),
                delegations: HashMap::new(),
                validators: HashMap::new(),
                broken_delegators: Vec::new(),
            }
        }

        /// One validator at par (1 share = 1 token) and a delegation to it.
        fn delegate(&mut self, delegator: Account, shares: u128) {
            let id = ValidatorId::new(format!("val-{delegator}"));
            self.validators.insert(
                id.clone(),
                ValidatorRecord {
                    id: id.clone(),
                    tokens: 1_000_000,
                    delegator_shares: Decimal::from_int(1_000_000).unwrap(),
                },
            );
            self.delegations.entry(delegator).or_default().push(Delegation {
                delegator,
                validator: id,
                shares: Decimal::from_int(shares).unwrap(),
            });
        }
    }

    impl StakingView for MemStaking {
        fn total_bonded_tokens(&self) -> Result<u128, StakingViewError> {
            self.total_bonded
                .clone()
                .map_err(StakingViewError::Query)
        }

        fn delegations_of(
            &self,
            delegator: &Account,
            page_size: u32,
        ) -> Result<Vec<Delegation>, StakingViewError> {
            if self.broken_delegators.contains(delegator) {
                return Err(StakingViewError::Query("corrupt record".to_string()));
            }
            let mut delegations = self
                .delegations
                .get(delegator)
                .cloned()
                .unwrap_or_default();
            delegations.truncate(page_size as usize);
            Ok(delegations)
        }

        fn validator(&self, id: &ValidatorId) -> Result<ValidatorRecord, StakingViewError> {
            self.validators
                .get(id)
                .cloned()
                .ok_or_else(|| StakingViewError::ValidatorNotFound(id.clone()))
        }
    }

    fn registry_with(entries: &[(Account, &str)]) -> RoleRegistry {
        let mut registry = RoleRegistry::new(authority(), RegistryParams::new(1, 0));
        for (account, multiplier) in entries {
            registry
                .create(
                    &authority(),
                    *account,
                    "community_member",
                    multiplier,
                    Timestamp::EPOCH,
                    authority(),
                    Timestamp::EPOCH,
                )
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_multiplier_scales_contribution() {
        // Voting power 100 with multiplier 2.0 contributes 200 to yes.
        let roles = registry_with(&[(acct(1), "2.0")]);
        let mut staking = MemStaking::new();
        staking.delegate(acct(1), 100);

        let votes: VoteSet = [(acct(1), VoteOption::Yes)].into_iter().collect();
        let result = WeightedTallyEngine::new()
            .tally(1, &votes, &roles, &staking)
            .unwrap();
        assert_eq!(result.yes, 200);
        assert_eq!(result.total(), 200);
    }

    #[test]
    fn test_fractional_weight_truncates_once() {
        // 333 * 1.5 = 499.5, truncated to 499 at accumulation.
        let roles = registry_with(&[(acct(1), "1.5")]);
        let mut staking = MemStaking::new();
        staking.delegate(acct(1), 333);

        let votes: VoteSet = [(acct(1), VoteOption::No)].into_iter().collect();
        let result = WeightedTallyEngine::new()
            .tally(1, &votes, &roles, &staking)
            .unwrap();
        assert_eq!(result.no, 499);
    }

    #[test]
    fn test_multiple_delegations_sum_before_weighting() {
        let roles = registry_with(&[(acct(1), "0.5")]);
        let mut staking = MemStaking::new();
        // Three delegations of 333 each: 999 * 0.5 = 499.5 -> 499.
        // Weighting per-delegation would give 166 * 3 = 498 instead.
        staking.delegate(acct(1), 333);
        staking.delegate(acct(1), 333);
        staking.delegate(acct(1), 333);

        let votes: VoteSet = [(acct(1), VoteOption::Yes)].into_iter().collect();
        let result = WeightedTallyEngine::new()
            .tally(1, &votes, &roles, &staking)
            .unwrap();
        assert_eq!(result.yes, 499);
    }

    #[test]
    fn test_votes_route_to_their_option() {
        let roles = registry_with(&[
            (acct(1), "1.0"),
            (acct(2), "1.0"),
            (acct(3), "1.0"),
            (acct(4), "1.0"),
        ]);
        let mut staking = MemStaking::new();
        for n in 1..=4 {
            staking.delegate(acct(n), 10 * n as u128);
        }

        let votes: VoteSet = [
            (acct(1), VoteOption::Yes),
            (acct(2), VoteOption::No),
            (acct(3), VoteOption::Abstain),
            (acct(4), VoteOption::NoWithVeto),
        ]
        .into_iter()
        .collect();

        let result = WeightedTallyEngine::new()
            .tally(1, &votes, &roles, &staking)
            .unwrap();
        assert_eq!(result.yes, 10);
        assert_eq!(result.no, 20);
        assert_eq!(result.abstain, 30);
        assert_eq!(result.no_with_veto, 40);
    }

    #[test]
    fn test_role_holder_without_vote_contributes_nothing() {
        let roles = registry_with(&[(acct(1), "2.0"), (acct(2), "2.0")]);
        let mut staking = MemStaking::new();
        staking.delegate(acct(1), 100);
        staking.delegate(acct(2), 100);

        let votes: VoteSet = [(acct(1), VoteOption::Yes)].into_iter().collect();
        let result = WeightedTallyEngine::new()
            .tally(1, &votes, &roles, &staking)
            .unwrap();
        assert_eq!(result.yes, 200);
        assert_eq!(result.total(), 200);
    }

    #[test]
    fn test_voter_without_role_is_out_of_scope() {
        // Only role holders are walked; a voter with no assignment does not
        // appear in the weighted totals.
        let roles = registry_with(&[(acct(1), "1.0")]);
        let mut staking = MemStaking::new();
        staking.delegate(acct(1), 100);
        staking.delegate(acct(9), 1000);

        let votes: VoteSet = [
            (acct(1), VoteOption::Yes),
            (acct(9), VoteOption::Yes),
        ]
        .into_iter()
        .collect();

        let result = WeightedTallyEngine::new()
            .tally(1, &votes, &roles, &staking)
            .unwrap();
        assert_eq!(result.yes, 100);
    }

    #[test]
    fn test_total_bonded_failure_is_fatal() {
        let roles = registry_with(&[(acct(1), "1.0")]);
        let mut staking = MemStaking::new();
        staking.total_bonded = Err("store offline".to_string());

        let votes: VoteSet = [(acct(1), VoteOption::Yes)].into_iter().collect();
        let err = WeightedTallyEngine::new()
            .tally(1, &votes, &roles, &staking)
            .unwrap_err();
        assert!(matches!(err, TallyError::TotalBondedUnavailable(_)));
    }

    #[test]
    fn test_broken_delegations_skip_only_that_voter() {
        let roles = registry_with(&[(acct(1), "1.0"), (acct(2), "1.0")]);
        let mut staking = MemStaking::new();
        staking.delegate(acct(1), 100);
        staking.delegate(acct(2), 100);
        staking.broken_delegators.push(acct(1));

        let votes: VoteSet = [
            (acct(1), VoteOption::Yes),
            (acct(2), VoteOption::Yes),
        ]
        .into_iter()
        .collect();

        let result = WeightedTallyEngine::new()
            .tally(1, &votes, &roles, &staking)
            .unwrap();
        assert_eq!(result.yes, 100);
    }

    #[test]
    fn test_missing_validator_zeroes_that_delegation() {
        let roles = registry_with(&[(acct(1), "1.0")]);
        let mut staking = MemStaking::new();
        staking.delegate(acct(1), 100);
        staking.delegations.get_mut(&acct(1)).unwrap().push(Delegation {
            delegator: acct(1),
            validator: ValidatorId::new("ghost"),
            shares: Decimal::from_int(9999).unwrap(),
        });

        let votes: VoteSet = [(acct(1), VoteOption::Yes)].into_iter().collect();
        let result = WeightedTallyEngine::new()
            .tally(1, &votes, &roles, &staking)
            .unwrap();
        assert_eq!(result.yes, 100);
    }

    #[test]
    fn test_page_size_bounds_delegation_scan() {
        let roles = registry_with(&[(acct(1), "1.0")]);
        let mut staking = MemStaking::new();
        for _ in 0..10 {
            staking.delegate(acct(1), 10);
        }

        let votes: VoteSet = [(acct(1), VoteOption::Yes)].into_iter().collect();
        let result = WeightedTallyEngine::with_page_size(3)
            .tally(1, &votes, &roles, &staking)
            .unwrap();
        assert_eq!(result.yes, 30);
    }

    #[test]
    fn test_empty_vote_set() {
        let roles = registry_with(&[(acct(1), "1.0")]);
        let staking = MemStaking::new();
        let result = WeightedTallyEngine::new()
            .tally(1, &VoteSet::new(), &roles, &staking)
            .unwrap();
        assert_eq!(result, TallyResult::new());
    }
}
