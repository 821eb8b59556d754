//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::{Deserialize, Serialize};

// == Stats Counters ==
/// Cumulative counters owned by a single cache instance.
///
/// Counters survive `clear`; they are running totals for the cache's lifetime.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsCounters {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl StatsCounters {
    /// Creates counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Snapshot ==
    /// Builds a point-in-time snapshot with the live entry count and memory estimate.
    pub fn snapshot(&self, total_entries: usize, memory_usage: usize) -> CacheStats {
        CacheStats {
            total_entries,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            hit_rate: hit_rate(self.hits, self.misses),
            memory_usage,
        }
    }
}

// == Cache Stats ==
/// Point-in-time view of cache performance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries removed by capacity eviction or lazy expiry
    pub evictions: u64,
    /// hits / (hits + misses), 0.0 before any access
    pub hit_rate: f64,
    /// Estimated bytes held by live entries
    pub memory_usage: usize,
}

// == Hit Rate ==
/// Calculates the cache hit rate.
///
/// Returns hits / (hits + misses), or 0.0 if no requests have been made.
pub fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
