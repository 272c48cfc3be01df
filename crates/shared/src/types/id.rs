//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `UserId` where a `CategoryId` is expected.
//! IDs are numeric and assigned by the persistence layer; zero marks a record that
//! has not been saved yet.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// The placeholder ID of a record that has not been persisted.
            pub const UNSET: Self = Self(0);

            /// Creates an ID from a raw number.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns true if no ID has been assigned yet.
            #[must_use]
            pub const fn is_unset(self) -> bool {
                self.0 == 0
            }

            /// Returns the inner number.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(CategoryId, "Unique identifier for a spending category.");
typed_id!(TransactionId, "Unique identifier for a ledger transaction.");
typed_id!(BudgetId, "Unique identifier for a monthly budget.");
typed_id!(GoalId, "Unique identifier for a savings goal.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_default_is_unset() {
        let id = TransactionId::default();
        assert!(id.is_unset());
        assert_eq!(id, TransactionId::UNSET);
    }

    #[test]
    fn test_typed_id_from_raw() {
        let id = UserId::new(42);
        assert!(!id.is_unset());
        assert_eq!(id.into_inner(), 42);
        assert_eq!(UserId::from(42), id);
    }

    #[test]
    fn test_typed_id_display() {
        assert_eq!(CategoryId::new(7).to_string(), "7");
    }

    #[test]
    fn test_typed_id_from_str() {
        assert_eq!(BudgetId::from_str(" 15 ").unwrap(), BudgetId::new(15));
        assert!(GoalId::from_str("abc").is_err());
    }

    #[test]
    fn test_typed_id_serializes_as_number() {
        let id = GoalId::new(3);
        let value = serde_json::to_string(&id).unwrap();
        assert_eq!(value, "3");
    }
}
