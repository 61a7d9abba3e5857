//! Strongly-typed ID wrappers for quote entities
//!
//! Identifiers are issued by the external data layer and are treated as
//! opaque strings (they are not guaranteed to be UUIDs). Locally generated
//! ids use a UUID v4 so they never collide with issued ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $local_prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier issued elsewhere
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh local identifier
            pub fn generate() -> Self {
                Self(format!("{}{}", $local_prefix, Uuid::new_v4()))
            }

            /// Whether this id was generated locally rather than issued
            pub fn is_local(&self) -> bool {
                self.0.starts_with($local_prefix)
            }

            /// Borrow the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }
    };
}

define_id!(QuoteId, "local-qte-");
define_id!(LineItemId, "local-itm-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_local_and_unique() {
        let a = QuoteId::generate();
        let b = QuoteId::generate();
        assert!(a.is_local());
        assert_ne!(a, b);
    }

    #[test]
    fn test_issued_id_is_opaque() {
        let id = QuoteId::new("65f1c0a2e4b0a1b2c3d4e5f6");
        assert!(!id.is_local());
        assert_eq!(id.to_string(), "65f1c0a2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let id = LineItemId::new("itm-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"itm-7\"");
        let back: LineItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_parse_trims() {
        let id: QuoteId = "  abc ".parse().unwrap();
        assert_eq!(id.as_str(), "abc");
    }
}
