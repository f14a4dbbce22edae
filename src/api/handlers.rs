//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Handlers only
//! translate between HTTP and the [`CacheStore`] contract; all cache
//! semantics live in the store.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use tracing::debug;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetQuery, GetResponse, HealthResponse, PutRequest, PutResponse,
};

/// Application state shared across all handlers.
///
/// The store synchronizes itself, so handlers share it through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<CacheStore>,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails when the configured capacity is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = CacheStore::new(config.capacity)?;
        Ok(Self::new(cache))
    }
}

/// Handler for POST /put
///
/// Inserts or updates a key-value pair. Evictions caused by the insert are
/// not reported to the client.
pub async fn put_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PutRequest>, JsonRejection>,
) -> Result<Json<PutResponse>> {
    let Json(req) = payload?;

    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    debug!(key = %req.key, "put");
    state.cache.put(req.key, req.value);

    Ok(Json(PutResponse::new()))
}

/// Handler for GET /get?key=...
///
/// Retrieves a value by key, refreshing its recency. A miss is a 404,
/// never an empty value.
pub async fn get_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<GetQuery>, QueryRejection>,
) -> Result<Json<GetResponse>> {
    let Query(query) = query?;
    let key = query
        .key
        .ok_or_else(|| CacheError::InvalidRequest("Missing 'key' query parameter".to_string()))?;

    match state.cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.cache.delete(&key)?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
