//! Votes, vote sets, and tally results.

use concord_types::Account;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The four vote options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOption {
    Yes,
    No,
    Abstain,
    NoWithVeto,
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Abstain => "abstain",
            Self::NoWithVeto => "no_with_veto",
        };
        write!(f, "{s}")
    }
}

/// The finalized votes of one proposal, one option per voter.
///
/// Backed by a `BTreeMap` so iteration order (and therefore anything
/// derived from it) is identical on every replica.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSet {
    votes: BTreeMap<Account, VoteOption>,
}

impl VoteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vote. A re-vote replaces the previous option.
    pub fn record(&mut self, voter: Account, option: VoteOption) {
        self.votes.insert(voter, option);
    }

    pub fn get(&self, voter: &Account) -> Option<VoteOption> {
        self.votes.get(voter).copied()
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Account, VoteOption)> {
        self.votes.iter().map(|(a, v)| (a, *v))
    }
}

impl FromIterator<(Account, VoteOption)> for VoteSet {
    fn from_iter<I: IntoIterator<Item = (Account, VoteOption)>>(iter: I) -> Self {
        Self {
            votes: iter.into_iter().collect(),
        }
    }
}

/// Weighted per-option totals, rebuilt fresh for every tally invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyResult {
    pub yes: u128,
    pub no: u128,
    pub abstain: u128,
    pub no_with_veto: u128,
}

impl TallyResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a voter's weighted power to one option's accumulator.
    ///
    /// Saturating: u128 holds any realistic weighted supply, and saturation
    /// keeps the operation total and replica-identical even on absurd
    /// inputs.
    pub fn add(&mut self, option: VoteOption, power: u128) {
        let slot = match option {
            VoteOption::Yes => &mut self.yes,
            VoteOption::No => &mut self.no,
            VoteOption::Abstain => &mut self.abstain,
            VoteOption::NoWithVeto => &mut self.no_with_veto,
        };
        *slot = slot.saturating_add(power);
    }

    /// Sum over all options.
    pub fn total(&self) -> u128 {
        self.yes
            .saturating_add(self.no)
            .saturating_add(self.abstain)
            .saturating_add(self.no_with_veto)
    }
}
