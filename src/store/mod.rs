//! Store Module
//!
//! Defines the key-value store contract the caching engine is built on,
//! plus an in-memory implementation with TTL expiry.

mod entry;
mod memory;
mod stats;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::{current_timestamp_ms, Entry, Value};
pub use memory::MemoryStore;
pub use stats::StoreStats;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Key Value Store Trait ==
/// Contract for the backing key-value store.
///
/// Each operation is atomic at the store; no multi-key transaction
/// semantics are offered or required. Implementations must treat an
/// expired-but-present entry as absent on every read path.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stores a scalar byte payload under `key` with no expiry.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Stores a scalar byte payload under `key`, expiring after `ttl_seconds`.
    async fn setex(&self, key: &str, ttl_seconds: u64, value: &[u8]) -> Result<()>;

    /// Retrieves the scalar payload for `key`.
    ///
    /// Returns `None` if the key is absent or expired. Reading a list key
    /// is a `WrongType` error.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically increments the integer stored at `key`, returning the
    /// new value. A missing key counts from zero; a payload that is not
    /// an ASCII integer is a `WrongType` error.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Appends `item` to the list at `key`, creating the list if absent.
    /// Returns the new list length.
    async fn rpush(&self, key: &str, item: &[u8]) -> Result<usize>;

    /// Returns the list items between `start` and `stop` inclusive,
    /// with Redis-style negative indices. An absent key yields an empty
    /// sequence.
    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Removes every key from the store.
    async fn flushdb(&self) -> Result<()>;
}
