//! The whole governance path in one place: role management under the
//! cooldown, vote bookkeeping, weighted tally, and registry persistence.

use concord_hooks::{GovernanceHooks, MultiplierHooks};
use concord_nullables::{NullClock, NullRoleStore, NullStakingView};
use concord_roles::{RegistryParams, RoleError, RoleRegistry};
use concord_tally::{VoteOption, VoteSet, WeightedTallyEngine};
use concord_types::{Account, Decimal, ValidatorId};

fn acct(n: u8) -> Account {
    Account::new([n; 20])
}

fn authority() -> Account {
    acct(0xAA)
}

#[test]
fn test_roles_votes_and_weighted_tally() {
    let clock = NullClock::new(1_000);
    let mut registry = RoleRegistry::new(authority(), RegistryParams::new(1, 300));

    // Authority assigns a core-contributor role to A.
    registry
        .create(
            &authority(),
            acct(1),
            "core_contributor",
            "2.0",
            clock.now(),
            authority(),
            clock.now(),
        )
        .unwrap();

    // A second creation 100s later trips the global cooldown.
    clock.advance(100);
    let err = registry
        .create(
            &authority(),
            acct(2),
            "validator",
            "1.5",
            clock.now(),
            authority(),
            clock.now(),
        )
        .unwrap_err();
    assert!(matches!(err, RoleError::RateLimited { remaining_secs: 200 }));

    // At the cooldown boundary it goes through.
    clock.advance(200);
    registry
        .create(
            &authority(),
            acct(2),
            "validator",
            "1.5",
            clock.now(),
            authority(),
            clock.now(),
        )
        .unwrap();

    // Stake: both voters delegate to the same at-par validator.
    let staking = NullStakingView::new();
    let validator = ValidatorId::new("val-1");
    staking.set_total_bonded(1_000_000);
    staking.add_validator_at_par(validator.clone(), 1_000_000);
    staking.add_delegation(acct(1), validator.clone(), Decimal::from_int(100).unwrap());
    staking.add_delegation(acct(2), validator.clone(), Decimal::from_int(50).unwrap());
    staking.add_delegation(acct(3), validator, Decimal::from_int(7777).unwrap());

    // Votes land through the hook adapter; the tally reads the vote set.
    let hooks = MultiplierHooks::new(&registry);
    let mut votes = VoteSet::new();
    for (voter, option) in [
        (acct(1), VoteOption::Yes),
        (acct(2), VoteOption::No),
        (acct(3), VoteOption::Yes), // no role: out of tally scope
    ] {
        hooks.on_vote_cast(42, &voter).unwrap();
        votes.record(voter, option);
    }

    let result = WeightedTallyEngine::new()
        .tally(42, &votes, &registry, &staking)
        .unwrap();
    assert_eq!(result.yes, 200); // 100 tokens * 2.0
    assert_eq!(result.no, 75); // 50 tokens * 1.5
    assert_eq!(result.abstain, 0);
    assert_eq!(result.no_with_veto, 0);
}

#[test]
fn test_registry_survives_store_roundtrip_with_cooldown() {
    let clock = NullClock::new(500);
    let store = NullRoleStore::new();
    let mut registry = RoleRegistry::new(authority(), RegistryParams::new(1, 300));
    registry
        .create(
            &authority(),
            acct(1),
            "strategic_partner",
            "1.8",
            clock.now(),
            authority(),
            clock.now(),
        )
        .unwrap();

    registry.save_to_store(&store).unwrap();
    let mut restored = RoleRegistry::load_from_store(authority(), &store).unwrap();

    assert_eq!(restored.len(), 1);
    assert_eq!(
        restored.lookup_by_account(&acct(1)).unwrap().multiplier,
        "1.8"
    );

    // The cooldown timer came back with the data.
    clock.advance(100);
    assert!(matches!(
        restored
            .create(
                &authority(),
                acct(2),
                "validator",
                "1.5",
                clock.now(),
                authority(),
                clock.now(),
            )
            .unwrap_err(),
        RoleError::RateLimited { remaining_secs: 200 }
    ));
}
