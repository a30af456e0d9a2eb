//! Fundamental types for the Concord policy layer.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: account identities, timestamps, denominated coin amounts, and
//! the fixed-point decimal used for voting-power arithmetic.

pub mod address;
pub mod coin;
pub mod decimal;
pub mod error;
pub mod time;

pub use address::{Account, ValidatorId};
pub use coin::{Coin, Coins};
pub use decimal::Decimal;
pub use error::{AddressError, DecimalError};
pub use time::Timestamp;
