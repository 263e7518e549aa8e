//! Typed block identifier.
//!
//! `BlockId` wraps a UUIDv7: time-ordered creation timestamp plus a random
//! suffix, collision-resistant without hand-rolling a generator. It is opaque
//! on the wire (serialized as a standard UUID string) and displays as full
//! UUID text for logging. The `short()` form (first 8 hex chars) is for
//! human-facing UI — never used as a lookup key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A block identifier (UUIDv7).
///
/// Unique across the entire tree — root list and every column slot — for the
/// lifetime of the tree. Assigned once at block creation and never changed.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(uuid::Uuid);

impl BlockId {
    /// Create a new time-ordered ID (UUIDv7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// First 8 hex characters — for human display only, not lookup.
    pub fn short(&self) -> String {
        self.0.as_simple().to_string()[..8].to_string()
    }

    /// Full 32-character hex string (no hyphens).
    pub fn to_hex(&self) -> String {
        self.0.as_simple().to_string()
    }

    /// The raw 16 bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Reconstruct from 16 bytes.
    pub fn from_bytes(b: [u8; 16]) -> Self {
        Self(uuid::Uuid::from_bytes(b))
    }

    /// Parse from a hex string (32 chars, no hyphens) or standard UUID format.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        uuid::Uuid::parse_str(s).map(Self)
    }

    /// A nil / zero ID — for sentinel values only.
    pub fn nil() -> Self {
        Self(uuid::Uuid::nil())
    }

    /// Check if this is the nil ID.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<uuid::Uuid> for BlockId {
    fn from(u: uuid::Uuid) -> Self {
        Self(u)
    }
}

impl From<BlockId> for uuid::Uuid {
    fn from(id: BlockId) -> uuid::Uuid {
        id.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full UUID with hyphens for log readability
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_distinct() {
        let a = BlockId::new();
        let b = BlockId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hex_roundtrip() {
        let id = BlockId::new();
        let parsed = BlockId::parse(&id.to_hex()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let id = BlockId::new();
        let json = serde_json::to_string(&id).unwrap();
        // Transparent: serializes as a bare UUID string
        assert!(json.starts_with('"') && json.ends_with('"'));
        let parsed: BlockId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_postcard_roundtrip() {
        let id = BlockId::new();
        let bytes = postcard::to_stdvec(&id).unwrap();
        let parsed: BlockId = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_short_is_prefix_of_hex() {
        let id = BlockId::new();
        assert_eq!(id.short().len(), 8);
        assert!(id.to_hex().starts_with(&id.short()));
    }

    #[test]
    fn test_nil_sentinel() {
        assert!(BlockId::nil().is_nil());
        assert!(!BlockId::new().is_nil());
    }

    #[test]
    fn test_usable_as_map_key() {
        use std::collections::BTreeMap;
        let id = BlockId::new();
        let mut map = BTreeMap::new();
        map.insert(id, "hello");
        assert_eq!(map.get(&id), Some(&"hello"));
    }
}
