//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and lazy TTL expiration.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker, StatsCounters};
use crate::clock::{Clock, SystemClock};

// == TTL Cache ==
/// Bounded key/value cache with per-entry TTL and least-recently-accessed eviction.
///
/// All operations are synchronous and total. Share it across tasks behind a
/// lock, as [`crate::AppState`] and [`crate::Memoizer`] do.
#[derive(Debug)]
pub struct TtlCache<V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Insertion order, used for eviction tie-breaks
    lru: LruTracker,
    /// Cumulative counters
    counters: StatsCounters,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Default TTL in milliseconds for entries without explicit TTL
    default_ttl: u64,
    clock: C,
}

impl<V> TtlCache<V, SystemClock> {
    // == Constructor ==
    /// Creates a new cache with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `default_ttl` - Default TTL in milliseconds for entries without explicit TTL
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self::with_clock(max_entries, default_ttl, SystemClock)
    }
}

impl<V, C: Clock> TtlCache<V, C> {
    /// Creates a new cache driven by a custom clock.
    pub fn with_clock(max_entries: usize, default_ttl: u64, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            counters: StatsCounters::new(),
            max_entries,
            default_ttl,
            clock,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns a clone of the value if found and not expired. Expired
    /// entries are removed and count as both a miss and an eviction.
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.counters.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.counters.record_miss();
            self.counters.record_eviction();
            debug!(key, "expired entry removed on access");
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.record_hit(now);
        self.counters.record_hit();
        Some(entry.value.clone())
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// If the key already exists, the value is overwritten and its
    /// timestamp, TTL and hit count are reset; overwrites never evict. If a
    /// new key would exceed capacity, the least recently accessed entry is
    /// evicted first.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL in milliseconds (uses default_ttl if None, negatives clamp to 0)
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<i64>) {
        let key = key.into();
        let now = self.clock.now_ms();
        let ttl = ttl.map_or(self.default_ttl, |ms| ms.max(0) as u64);

        if let Some(entry) = self.entries.get_mut(&key) {
            *entry = CacheEntry::new(value, ttl, now);
            return;
        }

        if self.entries.len() >= self.max_entries {
            self.evict_least_recent();
        }

        if self.entries.len() >= self.max_entries {
            debug!(key = %key, max_entries = self.max_entries, "cache has no capacity, entry dropped");
            return;
        }

        self.lru.insert(&key);
        self.entries.insert(key, CacheEntry::new(value, ttl, now));
    }

    // == Clear ==
    /// Removes all entries. Counters are cumulative and left untouched.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Length ==
    /// Returns the current number of entries, including not yet discovered expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks for a stored entry without touching counters or expiry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    fn evict_least_recent(&mut self) {
        let entries = &self.entries;
        let victim = self
            .lru
            .least_recent(|k| entries.get(k).map_or(0, |e| e.last_accessed))
            .map(str::to_string);

        if let Some(victim) = victim {
            self.remove_entry(&victim);
            self.counters.record_eviction();
            debug!(key = %victim, "evicted least recently accessed entry");
        }
    }

    fn remove_entry(&mut self, key: &str) {
        self.entries.remove(key);
        self.lru.remove(key);
    }
}

impl<V: Serialize, C: Clock> TtlCache<V, C> {
    // == Stats ==
    /// Returns current cache statistics with a fresh memory estimate.
    pub fn stats(&self) -> CacheStats {
        let memory_usage = self
            .entries
            .iter()
            .map(|(key, entry)| entry.estimated_size(key))
            .sum();

        self.counters.snapshot(self.entries.len(), memory_usage)
    }
}
