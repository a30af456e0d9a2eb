//! Voting roles and role assignments.

use concord_types::{Account, Decimal, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of the valid multiplier range (0.1, inclusive).
pub const MIN_MULTIPLIER: Decimal = Decimal::from_raw(100_000);

/// Upper bound of the valid multiplier range (10.0, inclusive).
pub const MAX_MULTIPLIER: Decimal = Decimal::from_raw(10_000_000);

/// The recognized voting roles.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    CoreContributor,
    Validator,
    CommunityMember,
    StrategicPartner,
}

impl RoleKind {
    pub const ALL: [RoleKind; 4] = [
        RoleKind::CoreContributor,
        RoleKind::Validator,
        RoleKind::CommunityMember,
        RoleKind::StrategicPartner,
    ];

    /// Parse the wire form of a role name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "core_contributor" => Some(Self::CoreContributor),
            "validator" => Some(Self::Validator),
            "community_member" => Some(Self::CommunityMember),
            "strategic_partner" => Some(Self::StrategicPartner),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoreContributor => "core_contributor",
            Self::Validator => "validator",
            Self::CommunityMember => "community_member",
            Self::StrategicPartner => "strategic_partner",
        }
    }

    /// The conventional multiplier for this role, used by tooling that
    /// proposes assignments. Nothing enforces it; the authority may assign
    /// any multiplier within bounds.
    pub fn default_multiplier(&self) -> &'static str {
        match self {
            Self::CoreContributor => "2.0",
            Self::Validator => "1.5",
            Self::CommunityMember => "1.0",
            Self::StrategicPartner => "1.8",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A role assignment: one account's voting role and tally multiplier.
///
/// The multiplier is stored in its decimal string form, exactly as it was
/// validated; it is re-parsed wherever it is applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub id: u64,
    pub account: Account,
    pub role: RoleKind,
    pub multiplier: String,
    pub assigned_at: Timestamp,
    pub assigned_by: Account,
}

impl RoleAssignment {
    /// Parse the stored multiplier. `None` when the stored string is not a
    /// valid decimal (possible only through corrupted state).
    pub fn multiplier_decimal(&self) -> Option<Decimal> {
        self.multiplier.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_all_known_roles() {
        for kind in RoleKind::ALL {
            assert_eq!(RoleKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RoleKind::parse("board_member"), None);
        assert_eq!(RoleKind::parse("Validator"), None);
    }

    #[test]
    fn test_default_multipliers_are_valid_decimals() {
        for kind in RoleKind::ALL {
            let parsed: Decimal = kind.default_multiplier().parse().unwrap();
            assert!(parsed >= MIN_MULTIPLIER && parsed <= MAX_MULTIPLIER);
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&RoleKind::StrategicPartner).unwrap();
        assert_eq!(json, "\"strategic_partner\"");
    }
}
