//! Object identity.
//!
//! Two identifiers exist for every live object:
//!
//! - [`ObjectId`]: a random UUID assigned at construction. It is persisted
//!   and stays the same across sessions.
//! - [`ObjectKey`]: a generational handle into the registry that owns the
//!   object. It is only meaningful within one process, and a key whose
//!   object has been destroyed simply stops resolving.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

slotmap::new_key_type! {
    /// Generational handle to a live object in an object registry.
    ///
    /// Components refer to their owner through this key. Once the owner is
    /// destroyed the key no longer resolves, so a component can never reach
    /// a freed object.
    pub struct ObjectKey;
}

/// A globally unique, persistent object identifier.
///
/// Identifiers are random v4 UUIDs: collisions within a process or across
/// saved sessions are negligible. They are persisted in their hyphenated
/// string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// The nil identifier, carried by destroyed objects.
    pub const INVALID: ObjectId = ObjectId(Uuid::nil());

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns `true` unless this is [`ObjectId::INVALID`].
    #[must_use]
    pub fn is_valid(self) -> bool {
        !self.0.is_nil()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ObjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_generated_ids_are_valid_and_unique() {
        let ids: HashSet<ObjectId> = (0..1000).map(|_| ObjectId::generate()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.is_valid()));
    }

    #[test]
    fn test_invalid_id() {
        assert!(!ObjectId::INVALID.is_valid());
        assert_eq!(
            ObjectId::INVALID.to_string(),
            "00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_display_parses_back() {
        let id = ObjectId::generate();
        let parsed: ObjectId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("GameObject".parse::<ObjectId>().is_err());
        assert!("".parse::<ObjectId>().is_err());
    }
}
