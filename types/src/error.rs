//! Errors for the shared identity and numeric types.

use thiserror::Error;

/// Failures decoding an account address from its canonical string form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address {0:?} does not start with the cncd_ prefix")]
    MissingPrefix(String),

    #[error("address body has {got} hex characters, expected {expected}")]
    BadLength { expected: usize, got: usize },

    #[error("address {0:?} contains non-hex characters")]
    BadHex(String),

    #[error("address {0:?} is not in canonical lowercase form")]
    NotCanonical(String),
}

/// Failures parsing a fixed-point decimal from its string form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecimalError {
    #[error("malformed decimal: {0:?}")]
    Malformed(String),

    #[error("decimal {input:?} has more than {max_places} fractional digits")]
    TooPrecise { input: String, max_places: u32 },

    #[error("decimal {0:?} does not fit in 128 bits")]
    Overflow(String),
}
