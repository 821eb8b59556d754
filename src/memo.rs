//! Memoization Module
//!
//! Caching decorator that wraps expensive upstream calls (search, listing)
//! with a shared [`TtlCache`].

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStats, TtlCache};
use crate::clock::{Clock, SystemClock};

// == Memoizer ==
/// Memoizes async upstream calls by key.
///
/// Clones share the same cache. The lock is released while the upstream
/// call is in flight, so two concurrent misses on one key may both fetch;
/// the later write wins.
pub struct Memoizer<V, C = SystemClock> {
    cache: Arc<RwLock<TtlCache<V, C>>>,
}

impl<V, C> Clone for Memoizer<V, C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<V> Memoizer<V, SystemClock> {
    /// Creates a memoizer over a fresh cache.
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self::from_cache(TtlCache::new(max_entries, default_ttl))
    }
}

impl<V, C: Clock> Memoizer<V, C> {
    /// Wraps an existing cache.
    pub fn from_cache(cache: TtlCache<V, C>) -> Self {
        Self::from_shared(Arc::new(RwLock::new(cache)))
    }

    /// Wraps a cache already shared with other consumers.
    pub fn from_shared(cache: Arc<RwLock<TtlCache<V, C>>>) -> Self {
        Self { cache }
    }

    // == Get Or Fetch ==
    /// Returns the cached value for `key`, or runs `fetch` on a miss.
    ///
    /// A successful fetch is stored with `ttl` (or the cache default when
    /// None). Errors are returned as-is and never cached; retrying is up to
    /// the caller.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, ttl: Option<i64>, fetch: F) -> Result<V, E>
    where
        V: Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.cache.write().await.get(key) {
            debug!(key, "memo hit");
            return Ok(value);
        }

        debug!(key, "memo miss, fetching upstream");
        let value = fetch().await?;

        self.cache.write().await.set(key, value.clone(), ttl);
        Ok(value)
    }

    /// Drops every memoized value. Counters keep running.
    pub async fn invalidate_all(&self) {
        self.cache.write().await.clear();
    }
}

impl<V: Serialize, C: Clock> Memoizer<V, C> {
    /// Returns the underlying cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }
}

// == Cache Key ==
/// Builds a deterministic key from a namespace and request parameters.
///
/// Parameters are rendered as JSON; struct fields serialize in declaration
/// order, so equal params give equal keys. Params that fail to serialize
/// fall back to the bare namespace.
pub fn cache_key<P: Serialize + ?Sized>(namespace: &str, params: &P) -> String {
    match serde_json::to_string(params) {
        Ok(json) => format!("{}:{}", namespace, json),
        Err(err) => {
            warn!(namespace, error = %err, "cache key params not serializable");
            namespace.to_string()
        }
    }
}
