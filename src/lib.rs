//! Pattern Cache - A bounded in-memory TTL cache
//!
//! Memoizes expensive upstream lookups with lazy TTL expiration,
//! least-recently-accessed eviction and hit/miss/eviction statistics.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod memo;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStats, TtlCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use memo::Memoizer;
pub use tasks::spawn_stats_reporter;
