//! Cache Module
//!
//! Provides in-memory caching with lazy TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::{hit_rate, CacheStats, StatsCounters};
pub use store::TtlCache;

// == Public Constants ==
/// Fixed bookkeeping cost charged per entry in the memory estimate
pub const ENTRY_OVERHEAD_BYTES: usize = 100;

/// Maximum allowed key length in bytes accepted over HTTP
pub const MAX_KEY_LENGTH: usize = 256;
