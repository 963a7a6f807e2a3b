//! Page Cache Module
//!
//! Caches fetched pages under a fixed TTL and tracks a per-url access
//! counter that, unlike the payloads it counts, never expires.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::store::{KeyValueStore, MAX_KEY_LENGTH};

// == Key Prefixes ==
const PAGE_KEY_PREFIX: &str = "cached:";

/// Store key holding the cached payload for a url.
pub fn page_key(url: &str) -> String {
    format!("{}{}", PAGE_KEY_PREFIX, url)
}

/// Store key holding the access counter for a url.
pub fn count_key(url: &str) -> String {
    format!("count:{}", url)
}

// == Fetcher Trait ==
/// Fetches a page from its origin.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

// == HTTP Fetcher ==
/// Production fetcher backed by a reqwest client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CacheError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Creates a fetcher with a 30-second timeout.
    pub fn with_defaults() -> Result<Self> {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let body = response.text().await?;
        Ok(body)
    }
}

// == Page Cache ==
/// TTL-bounded cache over an origin fetcher.
///
/// The check/fetch/write sequence spans two keys and is not atomic;
/// concurrent requests for the same url may each go to the origin. The
/// TTL semantics tolerate the duplicate fetch, so no per-url mutual
/// exclusion is applied.
pub struct PageCache<S: KeyValueStore> {
    store: S,
    fetcher: Arc<dyn Fetcher>,
    ttl_seconds: u64,
}

/// Default TTL for cached pages, in seconds.
pub const DEFAULT_PAGE_TTL: u64 = 10;

impl<S: KeyValueStore> PageCache<S> {
    // == Constructors ==
    /// Creates a page cache with the default 10-second TTL.
    pub fn new(store: S, fetcher: Arc<dyn Fetcher>) -> Self {
        Self::with_ttl(store, fetcher, DEFAULT_PAGE_TTL)
    }

    /// Creates a page cache with an explicit TTL in seconds.
    pub fn with_ttl(store: S, fetcher: Arc<dyn Fetcher>, ttl_seconds: u64) -> Self {
        Self {
            store,
            fetcher,
            ttl_seconds,
        }
    }

    // == Get ==
    /// Returns the page for `url`, from cache when a live entry exists,
    /// otherwise fetched from the origin and cached for the TTL.
    ///
    /// The access counter increments at the top of every valid call:
    /// hits, misses, and calls whose fetch subsequently fails all count.
    /// An expired-but-present entry is a miss. Fetch errors propagate and
    /// leave no cache entry behind.
    ///
    /// A url whose derived cache key would exceed the store's key limit
    /// is rejected before any counting or fetching, so the payload and
    /// counter keys never diverge.
    pub async fn get(&self, url: &str) -> Result<String> {
        // page_key carries the longer prefix, so this bound covers count_key too
        if page_key(url).len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Url exceeds maximum cacheable length of {} bytes",
                MAX_KEY_LENGTH - PAGE_KEY_PREFIX.len()
            )));
        }

        self.store.incr(&count_key(url)).await?;

        if let Some(bytes) = self.store.get(&page_key(url)).await? {
            debug!(url, "page cache hit");
            return String::from_utf8(bytes)
                .map_err(|_| CacheError::Decode("cached page is not valid UTF-8".to_string()));
        }

        debug!(url, "page cache miss, fetching from origin");
        let payload = self.fetcher.fetch(url).await?;

        self.store
            .setex(&page_key(url), self.ttl_seconds, payload.as_bytes())
            .await?;

        Ok(payload)
    }

    // == Access Count ==
    /// Returns how many times `url` has been requested through this cache.
    pub async fn access_count(&self, url: &str) -> Result<u64> {
        match self.store.get(&count_key(url)).await? {
            Some(bytes) => Ok(crate::cache::value::decode_int(&bytes)?.max(0) as u64),
            None => Ok(0),
        }
    }
}
