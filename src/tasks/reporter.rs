//! Stats Reporter Task
//!
//! Background task that periodically logs cache statistics. It only reads
//! the cache; expiry stays lazy and is discovered on access.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::TtlCache;
use crate::clock::Clock;

/// Spawns a background task that logs a stats snapshot every `interval_secs`.
///
/// Returns None when `interval_secs` is 0. The returned JoinHandle can be
/// aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(TtlCache::<Value>::new(1000, 300_000)));
/// let reporter = spawn_stats_reporter(cache.clone(), 60);
/// // Later, during shutdown:
/// if let Some(handle) = reporter { handle.abort(); }
/// ```
pub fn spawn_stats_reporter<V, C>(
    cache: Arc<RwLock<TtlCache<V, C>>>,
    interval_secs: u64,
) -> Option<JoinHandle<()>>
where
    V: Serialize + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    if interval_secs == 0 {
        return None;
    }

    info!("Starting stats reporter with interval of {} seconds", interval_secs);
    Some(spawn_reporter_every(cache, Duration::from_secs(interval_secs)))
}

fn spawn_reporter_every<V, C>(cache: Arc<RwLock<TtlCache<V, C>>>, period: Duration) -> JoinHandle<()>
where
    V: Serialize + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately; skip it so reports start after one period
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let stats = cache.read().await.stats();
            info!(
                entries = stats.total_entries,
                hits = stats.hits,
                misses = stats.misses,
                evictions = stats.evictions,
                hit_rate = stats.hit_rate,
                memory_bytes = stats.memory_usage,
                "cache stats"
            );
        }
    })
}
