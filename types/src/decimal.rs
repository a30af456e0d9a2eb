//! Fixed-point decimal arithmetic for voting power and multipliers.
//!
//! Stored as a `u128` scaled by 10^6, so all arithmetic is deterministic
//! integer multiply/add/divide with explicit floor semantics. Consensus
//! requires bit-identical results on every replica, which rules out floats
//! and any platform-dependent rounding.

use crate::error::DecimalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of fractional digits carried by [`Decimal`].
pub const DECIMAL_PLACES: u32 = 6;

const SCALE: u128 = 10u128.pow(DECIMAL_PLACES);

/// A non-negative fixed-point decimal with 6 fractional digits.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(u128);

impl Decimal {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(SCALE);

    /// Build from raw scaled units (`raw = value * 10^6`).
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Build from a whole number of units. `None` on overflow.
    pub fn from_int(units: u128) -> Option<Self> {
        units.checked_mul(SCALE).map(Self)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Floor of the exact product.
    ///
    /// Computed by splitting each operand into whole and fractional parts so
    /// intermediate products stay in range far longer than a naive
    /// `a.0 * b.0 / SCALE`. Only the `ra * rb` residue divides, and since the
    /// other three terms are exact integers the result equals
    /// `floor(a * b)` whenever it fits in a `u128`.
    pub fn checked_mul(self, other: Self) -> Option<Self> {
        let (qa, ra) = (self.0 / SCALE, self.0 % SCALE);
        let (qb, rb) = (other.0 / SCALE, other.0 % SCALE);

        let whole = qa.checked_mul(qb)?.checked_mul(SCALE)?;
        let cross = qa.checked_mul(rb)?.checked_add(qb.checked_mul(ra)?)?;
        let residue = ra * rb / SCALE; // ra, rb < 10^6, cannot overflow
        whole.checked_add(cross)?.checked_add(residue).map(Self)
    }

    /// Floor of the exact quotient. `None` when `other` is zero or the
    /// result overflows.
    pub fn checked_div(self, other: Self) -> Option<Self> {
        if other.0 == 0 {
            return None;
        }
        // floor(a * SCALE / b), with the numerator split to delay overflow.
        let q = self.0 / other.0;
        let r = self.0 % other.0;
        let scaled_q = q.checked_mul(SCALE)?;
        let scaled_r = r.checked_mul(SCALE)? / other.0;
        scaled_q.checked_add(scaled_r).map(Self)
    }

    /// Truncate to a whole number of units, dropping the fractional part.
    pub fn truncate(&self) -> u128 {
        self.0 / SCALE
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(DecimalError::Malformed(s.to_string()));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(DecimalError::Malformed(s.to_string()));
        }
        if frac.len() as u32 > DECIMAL_PLACES {
            return Err(DecimalError::TooPrecise {
                input: s.to_string(),
                max_places: DECIMAL_PLACES,
            });
        }

        let whole_units: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| DecimalError::Overflow(s.to_string()))?
        };
        let mut frac_units: u128 = if frac.is_empty() {
            0
        } else {
            // parse is infallible here apart from width, which the
            // DECIMAL_PLACES check already bounded
            frac.parse().map_err(|_| DecimalError::Overflow(s.to_string()))?
        };
        frac_units *= 10u128.pow(DECIMAL_PLACES - frac.len() as u32);

        whole_units
            .checked_mul(SCALE)
            .and_then(|w| w.checked_add(frac_units))
            .map(Self)
            .ok_or_else(|| DecimalError::Overflow(s.to_string()))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let frac = self.0 % SCALE;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:06}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({self})")
    }
}
