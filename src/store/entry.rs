//! Store Entry Module
//!
//! Defines the structure for individual store entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Value ==
/// The payload held by a store entry.
///
/// Scalars (raw bytes) and lists live in the same keyspace but are
/// distinct kinds; applying a list operation to a scalar key (or vice
/// versa) is a type error at the store.
#[derive(Debug, Clone)]
pub enum Value {
    /// A scalar byte payload (set/setex/get/incr)
    Raw(Vec<u8>),
    /// An ordered list of byte items (rpush/lrange)
    List(Vec<Vec<u8>>),
}

// == Store Entry ==
/// Represents a single store entry with payload and expiry metadata.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The stored payload
    pub value: Value,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl Entry {
    // == Constructor ==
    /// Creates a new entry with optional TTL.
    ///
    /// # Arguments
    /// * `value` - The payload to store
    /// * `ttl_seconds` - Optional TTL in seconds
    pub fn new(value: Value, ttl_seconds: Option<u64>) -> Self {
        let now = current_timestamp_ms();
        // An absurdly large TTL saturates to "never expires in practice"
        let expires_at = ttl_seconds.map(|ttl| now.saturating_add(ttl.saturating_mul(1000)));

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is considered expired when the current
    /// time is greater than or equal to the expiration time. Readers must
    /// treat an expired-but-present entry as absent; physical removal may
    /// lag behind logical expiry.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(0)` if the entry has expired (TTL elapsed)
    /// - `Some(remaining_ms)` if the entry has TTL and hasn't expired
    /// - `None` if the entry has no TTL (never expires)
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at.map(|expires| {
            let now = current_timestamp_ms();
            if expires > now {
                expires - now
            } else {
                0
            }
        })
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
