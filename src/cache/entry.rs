//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and access metadata.

use serde::Serialize;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub timestamp: u64,
    /// Time to live in milliseconds, 0 = expires on next access
    pub ttl: u64,
    /// Successful retrievals since creation
    pub hits: u64,
    /// Most recent successful retrieval (Unix milliseconds)
    pub last_accessed: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped at `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - TTL in milliseconds
    /// * `now` - Creation time in Unix milliseconds
    pub fn new(value: V, ttl: u64, now: u64) -> Self {
        Self {
            value,
            timestamp: now,
            ttl,
            hits: 0,
            last_accessed: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry is stale at `now`.
    ///
    /// An entry is stale once strictly more than `ttl` milliseconds have
    /// passed since creation. A zero TTL is stale on any access.
    pub fn is_expired(&self, now: u64) -> bool {
        self.ttl == 0 || now.saturating_sub(self.timestamp) > self.ttl
    }

    // == Record Hit ==
    /// Marks a successful retrieval at `now`.
    pub fn record_hit(&mut self, now: u64) {
        self.hits += 1;
        // Keep last_accessed >= timestamp even if the clock steps back.
        self.last_accessed = now.max(self.timestamp);
    }
}

impl<V: Serialize> CacheEntry<V> {
    // == Estimated Size ==
    /// Approximate bytes held by this entry under `key`.
    ///
    /// Key and serialized value are counted as two-byte characters, plus a
    /// fixed per-entry overhead. A value that fails to serialize counts as
    /// zero length.
    pub fn estimated_size(&self, key: &str) -> usize {
        let value_len = serde_json::to_string(&self.value)
            .map(|json| json.encode_utf16().count())
            .unwrap_or(0);

        2 * key.encode_utf16().count() + 2 * value_len + super::ENTRY_OVERHEAD_BYTES
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value".to_string(), 1_000, 5_000);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.timestamp, 5_000);
        assert_eq!(entry.last_accessed, 5_000);
        assert_eq!(entry.hits, 0);
        assert!(!entry.is_expired(5_000));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("test", 1_000, 0);

        // Stale only once strictly past timestamp + ttl
        assert!(!entry.is_expired(1_000));
        assert!(entry.is_expired(1_001));
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let entry = CacheEntry::new("test", 0, 100);
        assert!(entry.is_expired(100));
    }

    #[test]
    fn test_record_hit() {
        let mut entry = CacheEntry::new(1u32, 1_000, 100);
        entry.record_hit(150);
        entry.record_hit(175);

        assert_eq!(entry.hits, 2);
        assert_eq!(entry.last_accessed, 175);
    }

    #[test]
    fn test_record_hit_clock_backwards() {
        let mut entry = CacheEntry::new(1u32, 1_000, 100);
        entry.record_hit(50);

        assert!(entry.last_accessed >= entry.timestamp);
    }

    #[test]
    fn test_estimated_size() {
        // key "ab" (2 chars), value "\"xyz\"" (5 chars)
        let entry = CacheEntry::new("xyz", 1_000, 0);
        assert_eq!(entry.estimated_size("ab"), 2 * 2 + 2 * 5 + 100);
    }

    #[test]
    fn test_estimated_size_counts_utf16_units() {
        // "é" is one UTF-16 unit but two UTF-8 bytes
        let entry = CacheEntry::new(1u8, 1_000, 0);
        assert_eq!(entry.estimated_size("é"), 2 + 2 + 100);
    }

    #[test]
    fn test_estimated_size_unserializable_value() {
        // JSON object keys must be strings
        let mut value = HashMap::new();
        value.insert(vec![1u8], 1u8);
        let entry = CacheEntry::new(value, 1_000, 0);

        assert_eq!(entry.estimated_size("k"), 2 + 100);
    }
}
