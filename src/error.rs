//! Error types for the caching engine
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the caching engine and its HTTP surface.
///
/// A missing key on read is NOT an error at the library level; lookups
/// return `Option`. `NotFound` exists for the HTTP layer, which maps an
/// absent key to a 404.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found (HTTP-level only)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Operation applied to a key holding the wrong kind of value
    #[error("Wrong value type for key: {0}")]
    WrongType(String),

    /// A stored value could not be decoded as the requested type
    #[error("Decode error: {0}")]
    Decode(String),

    /// The origin fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// The backing key-value store is unavailable or failed
    #[error("Store error: {0}")]
    Store(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for CacheError {
    fn from(err: reqwest::Error) -> Self {
        CacheError::Fetch(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CacheError::WrongType(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CacheError::Decode(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            CacheError::Fetch(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            CacheError::Store(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            CacheError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the caching engine.
pub type Result<T> = std::result::Result<T, CacheError>;
