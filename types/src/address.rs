//! Account and validator identity types with `cncd_` prefixes.

use crate::error::AddressError;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A Concord account identity: a fixed 20-byte identifier.
///
/// The canonical string encoding is `cncd_` followed by the 40-character
/// lowercase hex of the identifier. All validating nodes must agree on this
/// encoding byte-for-byte, so there is exactly one accepted form: no mixed
/// case, no alternate prefixes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Account([u8; Account::LEN]);

impl Account {
    /// The standard prefix for all Concord account addresses.
    pub const PREFIX: &'static str = "cncd_";

    /// Identifier length in bytes.
    pub const LEN: usize = 20;

    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Parse the canonical string encoding.
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let body = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| AddressError::MissingPrefix(s.to_string()))?;
        if body.len() != Self::LEN * 2 {
            return Err(AddressError::BadLength {
                expected: Self::LEN * 2,
                got: body.len(),
            });
        }
        if body.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(AddressError::NotCanonical(s.to_string()));
        }
        let raw = hex::decode(body).map_err(|_| AddressError::BadHex(s.to_string()))?;
        let mut bytes = [0u8; Self::LEN];
        bytes.copy_from_slice(&raw);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, hex::encode(self.0))
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account({self})")
    }
}

impl FromStr for Account {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Serialized in canonical string form so genesis files and snapshots carry
// the same encoding the wire does.
impl Serialize for Account {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Account {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AccountVisitor;

        impl Visitor<'_> for AccountVisitor {
            type Value = Account;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a cncd_-prefixed account address")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Account, E> {
                Account::parse(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(AccountVisitor)
    }
}

/// Opaque identity of a validator operator.
///
/// Validators live in the host staking subsystem's address space; this core
/// only passes the identity through to delegation and validator lookups.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ValidatorId(String);

impl ValidatorId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_canonical_encoding() {
        let account = Account::new([0xab; 20]);
        let encoded = account.to_string();
        assert!(encoded.starts_with("cncd_"));
        assert_eq!(encoded.len(), 5 + 40);
        assert_eq!(Account::parse(&encoded).unwrap(), account);
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        let err = Account::parse(&hex::encode([1u8; 20])).unwrap_err();
        assert!(matches!(err, AddressError::MissingPrefix(_)));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            Account::parse("cncd_abcdef").unwrap_err(),
            AddressError::BadLength { expected: 40, got: 6 }
        ));
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let bad = format!("cncd_{}", "zz".repeat(20));
        assert!(matches!(
            Account::parse(&bad).unwrap_err(),
            AddressError::BadHex(_)
        ));
    }

    #[test]
    fn test_parse_rejects_uppercase_hex() {
        let canonical = Account::new([0xab; 20]).to_string();
        let shouty = canonical.to_uppercase().replace("CNCD_", "cncd_");
        assert!(matches!(
            Account::parse(&shouty).unwrap_err(),
            AddressError::NotCanonical(_)
        ));
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let account = Account::new([7u8; 20]);
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(json, format!("\"{account}\""));
        let back: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(back, account);
    }
}
