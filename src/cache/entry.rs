//! Cache Entry Module
//!
//! Defines cache keys and the structure for individual cache entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::payload::Payload;

// == Cache Key ==
/// Caller-supplied fingerprint identifying a cacheable request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CacheKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for CacheKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Cache Entry ==
/// A stored payload and its fixed budget charge.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value, never mutated after insertion
    pub value: Payload,
    /// Size charged against the byte budget, computed once at insertion
    pub size_bytes: u64,
    /// Position in the recency list
    pub(crate) slot: usize,
}

impl CacheEntry {
    // == Constructor ==
    pub(crate) fn new(value: Payload, size_bytes: u64, slot: usize) -> Self {
        Self {
            value,
            size_bytes,
            slot,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_equality_and_hash() {
        let mut keys = HashSet::new();
        keys.insert(CacheKey::from("model-a:123"));
        keys.insert(CacheKey::new(String::from("model-a:123")));
        keys.insert(CacheKey::from("model-b:123"));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_key_serializes_as_plain_string() {
        let key = CacheKey::from("abc");
        assert_eq!(serde_json::to_string(&key).unwrap(), r#""abc""#);
        assert_eq!(key.to_string(), "abc");
    }

    #[test]
    fn test_entry_keeps_size() {
        let entry = CacheEntry::new(Payload::bytes(vec![1, 2, 3]), 3, 0);
        assert_eq!(entry.size_bytes, 3);
        assert_eq!(entry.value, Payload::bytes(vec![1, 2, 3]));
    }
}
