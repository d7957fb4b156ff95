//! Strongly-typed ID wrappers for the stored records
//!
//! The storage collaborator hands out opaque UUIDs. Wrapping them per entity
//! keeps a budget id from ever being passed where a transaction id is meant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Check whether user input refers to this ID
            ///
            /// Accepts the full UUID, the short display form (`txn-1a2b3c4d`)
            /// or the bare eight-character prefix.
            pub fn matches(&self, input: &str) -> bool {
                let input = input.trim();
                let full = self.0.to_string();
                if input.eq_ignore_ascii_case(&full) {
                    return true;
                }
                let short = input.strip_prefix($display_prefix).unwrap_or(input);
                short.len() >= 8 && full.starts_with(&short.to_ascii_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(BudgetId, "bud-");
define_id!(CategoryLimitId, "lim-");
define_id!(RecurringExpenseId, "rec-");
define_id!(GoalId, "goal-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = TransactionId::new();
        let display = id.to_string();
        assert!(display.starts_with("txn-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_matches_short_and_full_forms() {
        let id = BudgetId::new();
        let full = id.as_uuid().to_string();

        assert!(id.matches(&full));
        assert!(id.matches(&id.to_string()));
        assert!(id.matches(&full[..8]));
        assert!(!id.matches("bud-"));
        assert!(!id.matches(&full[..4]));
        assert!(!BudgetId::new().matches(&id.to_string()));
    }

    #[test]
    fn test_id_serializes_as_bare_uuid() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: GoalId = serde_json::from_str(&format!("\"{}\"", uuid_str)).unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
        assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{}\"", uuid_str));
    }

    #[test]
    fn test_from_str_with_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: TransactionId = format!("txn-{}", uuid_str).parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
    }
}
