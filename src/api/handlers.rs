//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheStats, TtlCache};
use crate::error::{CacheError, Result};
use crate::models::{
    requests::validate_key, ClearResponse, GetResponse, HealthResponse, SetRequest, SetResponse,
};

/// Cache type served over HTTP: arbitrary JSON values.
pub type JsonCache = TtlCache<Value>;

/// Application state shared across all handlers.
///
/// Contains the cache wrapped in Arc<RwLock<>>; every operation, reads
/// included, runs under the write lock because `get` updates counters.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RwLock<JsonCache>>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: JsonCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(TtlCache::new(config.max_entries, config.default_ttl_ms))
    }
}

/// Handler for PUT /set
///
/// Stores a JSON value in the cache with optional TTL in milliseconds.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    cache.set(req.key.clone(), req.value, req.ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Missing and expired keys both answer 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    // Write lock: get updates hit counters and recency
    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    let cleared = cache.len();
    cache.clear();
    debug!(cleared, "cache cleared");

    Json(ClearResponse::new(cleared))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    let cache = state.cache.read().await;
    Json(cache.stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_state() -> AppState {
        AppState::new(TtlCache::new(100, 300_000))
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let req = SetRequest {
            key: "patterns:list".to_string(),
            value: json!([{"id": "retry"}, {"id": "builder"}]),
            ttl: None,
        };
        let result = set_handler(State(state.clone()), Json(req)).await;
        assert!(result.is_ok());

        let response = get_handler(State(state.clone()), Path("patterns:list".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value[1]["id"], "builder");
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let result = get_handler(State(test_state()), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_expired_key_is_not_found() {
        let state = test_state();
        let req = SetRequest {
            key: "stale".to_string(),
            value: json!(1),
            ttl: Some(0),
        };
        let response = set_handler(State(state.clone()), Json(req)).await.unwrap();
        assert_eq!(response.key, "stale");

        let result = get_handler(State(state.clone()), Path("stale".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.evictions, 1);
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let state = test_state();
        for key in ["a", "b"] {
            let req = SetRequest {
                key: key.to_string(),
                value: json!(key),
                ttl: None,
            };
            let response = set_handler(State(state.clone()), Json(req)).await.unwrap();
            assert_eq!(response.key, key);
        }

        let response = clear_handler(State(state.clone())).await;
        assert_eq!(response.cleared, 2);

        let result = get_handler(State(state), Path("a".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let response = stats_handler(State(test_state())).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
        assert_eq!(response.hit_rate, 0.0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let req = SetRequest {
            key: "".to_string(),
            value: json!("value"),
            ttl: None,
        };
        let result = set_handler(State(test_state()), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
