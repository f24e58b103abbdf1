//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use super::database::Database;
use crate::cache::CacheAside;
use crate::config::Config;
use crate::models::{DataResponse, HealthResponse, StatsResponse};
use crate::store::SharedStore;

/// Application state shared across all handlers.
///
/// The store is injected once at startup; handlers and the cache layer
/// reach it only through this state.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside layer over the configured store
    pub cache: CacheAside,
    /// Producer behind the cached route
    pub database: Arc<Database>,
}

impl AppState {
    /// Creates a new AppState caching bodies in `store` for `ttl_seconds`.
    pub fn new(store: SharedStore, ttl_seconds: u64) -> Self {
        Self {
            cache: CacheAside::new(store, ttl_seconds),
            database: Arc::new(Database::new()),
        }
    }

    /// Creates a new AppState using the TTL from configuration.
    pub fn from_config(store: SharedStore, config: &Config) -> Self {
        Self::new(store, config.cache_ttl)
    }
}

/// Handler for GET /api/data
///
/// Queries the database. Runs only on a cache miss.
pub async fn data_handler(State(state): State<AppState>) -> Json<DataResponse> {
    Json(state.database.fetch_data().await)
}

/// Handler for GET /stats
///
/// Returns current cache-aside statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    Json(StatsResponse::new(&stats, state.cache.ttl_seconds()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
