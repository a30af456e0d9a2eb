//! Denominated token amounts.
//!
//! Amounts are fixed-point integers (u128) in the smallest unit of their
//! denomination. `Coins` is the multi-denomination form used by vesting
//! schedules; it is kept sorted by denom so comparisons and iteration are
//! deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single denominated amount.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A set of coins, at most one entry per denomination, sorted by denom.
///
/// Zero-amount entries are dropped on construction, so "no coins of denom X"
/// and "zero coins of denom X" are the same state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Normalize a list of coins: merge duplicate denoms, drop zeros, sort.
    pub fn from_coins(coins: impl IntoIterator<Item = Coin>) -> Self {
        let mut merged: Vec<Coin> = Vec::new();
        for coin in coins {
            match merged.iter_mut().find(|c| c.denom == coin.denom) {
                Some(existing) => {
                    existing.amount = existing.amount.saturating_add(coin.amount)
                }
                None => merged.push(coin),
            }
        }
        merged.retain(|c| !c.is_zero());
        merged.sort_by(|a, b| a.denom.cmp(&b.denom));
        Self(merged)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// The amount of the given denomination, zero if absent.
    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(0)
    }

    /// True when, for every denomination in `other`, this set holds at
    /// least as much. The empty set is ≥ the empty set.
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other.0.iter().all(|c| self.amount_of(&c.denom) >= c.amount)
    }

    /// Per-denomination difference, saturating each denom at zero.
    pub fn saturating_sub(&self, other: &Coins) -> Coins {
        Coins::from_coins(self.0.iter().map(|c| Coin {
            denom: c.denom.clone(),
            amount: c.amount.saturating_sub(other.amount_of(&c.denom)),
        }))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "0");
        }
        let rendered: Vec<String> = self.0.iter().map(Coin::to_string).collect();
        write!(f, "{}", rendered.join(","))
    }
}
