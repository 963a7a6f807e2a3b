//! API Handlers
//!
//! HTTP request handlers for each caching server endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{Cache, Fetcher, HttpFetcher, PageCache, ReplayEngine};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    CountResponse, GetResponse, HealthResponse, PageQuery, PageResponse, StatsResponse,
    StoreRequest, StoreResponse,
};
use crate::store::MemoryStore;

/// Application state shared across all handlers.
///
/// The instrumented cache and the page cache share one store, so the
/// replay and stats endpoints see both layers.
#[derive(Clone)]
pub struct AppState {
    /// Shared store handle, used directly by replay and stats
    pub store: MemoryStore,
    /// Instrumented value cache
    pub cache: Arc<Cache<MemoryStore>>,
    /// TTL page cache
    pub pages: Arc<PageCache<MemoryStore>>,
}

impl AppState {
    /// Creates a new AppState over `store` with the given fetcher and
    /// page TTL. Constructing the cache flushes the store.
    pub async fn new(
        store: MemoryStore,
        fetcher: Arc<dyn Fetcher>,
        page_ttl: u64,
    ) -> Result<Self> {
        let cache = Cache::new(store.clone()).await?;
        let pages = PageCache::with_ttl(store.clone(), fetcher, page_ttl);
        Ok(Self {
            store,
            cache: Arc::new(cache),
            pages: Arc::new(pages),
        })
    }

    /// Creates a new AppState from configuration, with the HTTP fetcher.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(config.fetch_timeout))?);
        Self::new(MemoryStore::new(), fetcher, config.page_ttl).await
    }
}

/// Handler for POST /store
///
/// Stores a JSON scalar in the cache and returns the generated key.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    let value = req.into_stored_value()?;
    let key = state.cache.store(value).await?;
    Ok(Json(StoreResponse::new(key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a stored value by key, decoded as a UTF-8 string. The
/// library reports a missing key as absent; at the HTTP boundary that
/// becomes a 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get_str(&key).await? {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /replay/:identity
///
/// Renders the recorded call history for an operation identity as
/// plain text.
pub async fn replay_handler(
    State(state): State<AppState>,
    Path(identity): Path<String>,
) -> Result<String> {
    ReplayEngine::new(&state.store).render(&identity).await
}

/// Handler for GET /page?url=
///
/// Fetches a page through the TTL cache.
pub async fn page_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let payload = state.pages.get(&query.url).await?;
    Ok(Json(PageResponse::new(query.url, payload)))
}

/// Handler for GET /page/count?url=
///
/// Reads the access counter for a url.
pub async fn page_count_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CountResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let count = state.pages.access_count(&query.url).await?;
    Ok(Json(CountResponse::new(query.url, count)))
}

/// Handler for GET /stats
///
/// Returns current store statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.store.stats().await;

    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.expired,
        stats.keys,
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
