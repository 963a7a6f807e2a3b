//! Request DTOs for the caching server API
//!
//! Defines the structure of incoming HTTP request bodies and queries.

use serde::Deserialize;

use crate::cache::StoredValue;
use crate::error::{CacheError, Result};

/// Request body for the store operation (POST /store)
///
/// Accepts any JSON scalar; the value is mapped onto the cache's tagged
/// value type. Arrays, objects, booleans, and null are rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    /// The value to store: a string, integer, or float
    pub value: serde_json::Value,
}

impl StoreRequest {
    /// Converts the JSON scalar into a storable value.
    pub fn into_stored_value(self) -> Result<StoredValue> {
        match self.value {
            serde_json::Value::String(s) => Ok(StoredValue::Str(s)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(StoredValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(StoredValue::Float(f))
                } else {
                    Err(CacheError::InvalidRequest(format!(
                        "Unsupported numeric value: {}",
                        n
                    )))
                }
            }
            other => Err(CacheError::InvalidRequest(format!(
                "Value must be a string or number, got: {}",
                other
            ))),
        }
    }
}

/// Query parameters for the page cache endpoints (GET /page, GET /page/count)
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    /// The url to fetch through the page cache
    pub url: String,
}

impl PageQuery {
    /// Validates the query.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.is_empty() {
            return Some("Url cannot be empty".to_string());
        }
        None
    }
}
