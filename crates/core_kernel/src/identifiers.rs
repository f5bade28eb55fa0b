//! Strongly-typed identifiers for items, users and the records they produce
//!
//! Every identifier wraps a UUID and serializes as the bare UUID, so the wire
//! format stays a plain string while the compiler keeps an `ItemId` from ever
//! being passed where a `UserId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Item aggregate identifiers
define_id!(ItemId, "ITM");
define_id!(CommentId, "CMT");

// People
define_id!(UserId, "USR");

// Side-effect records
define_id!(NotificationId, "NTF");
define_id!(ClaimLogId, "CLG");
define_id!(ClaimRecordId, "CRH");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_display() {
        let id = ItemId::new();
        let display = id.to_string();
        assert!(display.starts_with("ITM-"));
    }

    #[test]
    fn test_id_parsing() {
        let original = UserId::new();
        let parsed: UserId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_bare_uuid_parses() {
        let uuid = Uuid::new_v4();
        let parsed: NotificationId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_uuid_conversion() {
        let uuid = Uuid::new_v4();
        let item_id = ItemId::from(uuid);
        let back: Uuid = item_id.into();
        assert_eq!(uuid, back);
    }
}
