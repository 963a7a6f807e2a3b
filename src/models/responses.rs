//! Response DTOs for the caching server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for the store operation (POST /store)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// The generated key the value was stored under
    pub key: String,
}

impl StoreResponse {
    /// Creates a new StoreResponse
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Response body for the get operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for the page cache (GET /page)
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse {
    /// The requested url
    pub url: String,
    /// The page payload, cached or freshly fetched
    pub payload: String,
}

impl PageResponse {
    /// Creates a new PageResponse
    pub fn new(url: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            payload: payload.into(),
        }
    }
}

/// Response body for the access counter (GET /page/count)
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    /// The requested url
    pub url: String,
    /// How many times the url has been requested through the cache
    pub count: u64,
}

impl CountResponse {
    /// Creates a new CountResponse
    pub fn new(url: impl Into<String>, count: u64) -> Self {
        Self {
            url: url.into(),
            count,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of store reads that found a live entry
    pub hits: u64,
    /// Number of store reads that found nothing
    pub misses: u64,
    /// Number of entries removed after TTL expiry
    pub expired: u64,
    /// Current number of keys in the store
    pub keys: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from store statistics
    pub fn new(hits: u64, misses: u64, expired: u64, keys: usize) -> Self {
        let total_reads = hits + misses;
        let hit_rate = if total_reads > 0 {
            hits as f64 / total_reads as f64
        } else {
            0.0
        };
        Self {
            hits,
            misses,
            expired,
            keys,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_response_serialize() {
        let resp = StoreResponse::new("abc-123");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("abc-123"));
    }

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("test_key", "test_value");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("test_key"));
        assert!(json.contains("test_value"));
    }

    #[test]
    fn test_page_response_serialize() {
        let resp = PageResponse::new("http://x", "<html></html>");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("http://x"));
    }

    #[test]
    fn test_count_response_serialize() {
        let resp = CountResponse::new("http://x", 7);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"count\":7"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let resp = StatsResponse::new(80, 20, 5, 100);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_stats_response_zero_reads() {
        let resp = StatsResponse::new(0, 0, 0, 0);
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
