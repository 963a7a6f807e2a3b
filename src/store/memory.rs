//! In-Memory Store Module
//!
//! Main store engine combining HashMap storage with TTL expiration,
//! implementing the `KeyValueStore` contract.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CacheError, Result};
use crate::store::{Entry, KeyValueStore, StoreStats, Value, MAX_KEY_LENGTH, MAX_VALUE_SIZE};

// == Inner State ==
#[derive(Debug, Default)]
struct Inner {
    /// Key-value storage
    entries: HashMap<String, Entry>,
    /// Performance statistics
    stats: StoreStats,
}

impl Inner {
    /// Removes the entry if it has logically expired, recording the
    /// expiration. Returns true if an entry remains under `key`.
    fn purge_if_expired(&mut self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.stats.record_expired();
                false
            }
            Some(_) => true,
            None => false,
        }
    }
}

// == Memory Store ==
/// In-memory key-value store with per-key TTL expiry.
///
/// Cloning produces another handle to the same underlying storage, so a
/// single store can be shared between the cache layers and the background
/// sweep task.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a new, empty MemoryStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Validation ==
    fn validate(key: &str, value: &[u8]) -> Result<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }
        Ok(())
    }

    // == Stats ==
    /// Returns current store statistics.
    pub async fn stats(&self) -> StoreStats {
        let inner = self.inner.read().await;
        let mut stats = inner.stats.clone();
        stats.set_keys(inner.entries.len());
        stats
    }

    // == Sweep Expired ==
    /// Removes all physically-present entries whose TTL has elapsed.
    ///
    /// Returns the number of entries removed. Reads already treat expired
    /// entries as absent; this reclaims the memory they occupy.
    pub async fn sweep_expired(&self) -> usize {
        let mut inner = self.inner.write().await;

        let expired_keys: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            inner.entries.remove(&key);
            inner.stats.record_expired();
        }

        let total = inner.entries.len();
        inner.stats.set_keys(total);
        count
    }

    // == Length ==
    /// Returns the current number of keys in the store.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    /// Returns true if the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }
}

// == Range Normalization ==
/// Maps Redis-style start/stop indices (negatives count from the end)
/// onto a concrete half-open range over a list of length `len`.
fn normalize_range(start: i64, stop: i64, len: usize) -> Option<(usize, usize)> {
    let len = len as i64;
    let mut start = if start < 0 { len + start } else { start };
    let mut stop = if stop < 0 { len + stop } else { stop };

    start = start.max(0);
    stop = stop.min(len - 1);

    if start > stop || start >= len {
        None
    } else {
        Some((start as usize, (stop + 1) as usize))
    }
}

// == KeyValueStore Implementation ==
#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        Self::validate(key, value)?;

        let mut inner = self.inner.write().await;
        inner
            .entries
            .insert(key.to_string(), Entry::new(Value::Raw(value.to_vec()), None));
        let total = inner.entries.len();
        inner.stats.set_keys(total);
        Ok(())
    }

    async fn setex(&self, key: &str, ttl_seconds: u64, value: &[u8]) -> Result<()> {
        Self::validate(key, value)?;

        let mut inner = self.inner.write().await;
        inner.entries.insert(
            key.to_string(),
            Entry::new(Value::Raw(value.to_vec()), Some(ttl_seconds)),
        );
        let total = inner.entries.len();
        inner.stats.set_keys(total);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: expired entries are purged on read and stats updated
        let mut inner = self.inner.write().await;

        if !inner.purge_if_expired(key) {
            inner.stats.record_miss();
            let total = inner.entries.len();
            inner.stats.set_keys(total);
            return Ok(None);
        }

        let payload = match inner.entries.get(key) {
            Some(entry) => match &entry.value {
                Value::Raw(bytes) => bytes.clone(),
                Value::List(_) => return Err(CacheError::WrongType(key.to_string())),
            },
            None => return Err(CacheError::Internal(format!("entry vanished: {}", key))),
        };

        inner.stats.record_hit();
        Ok(Some(payload))
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut inner = self.inner.write().await;

        let (current, expires_at) = if inner.purge_if_expired(key) {
            match inner.entries.get(key) {
                Some(entry) => match &entry.value {
                    Value::Raw(bytes) => {
                        let text = std::str::from_utf8(bytes)
                            .map_err(|_| CacheError::WrongType(key.to_string()))?;
                        let n: i64 = text
                            .parse()
                            .map_err(|_| CacheError::WrongType(key.to_string()))?;
                        (n, entry.expires_at)
                    }
                    Value::List(_) => return Err(CacheError::WrongType(key.to_string())),
                },
                None => (0, None),
            }
        } else {
            (0, None)
        };

        let next = current.checked_add(1).ok_or_else(|| {
            CacheError::InvalidRequest(format!("increment would overflow for key: {}", key))
        })?;
        let mut entry = Entry::new(Value::Raw(next.to_string().into_bytes()), None);
        // INCR preserves any expiry already set on the key
        entry.expires_at = expires_at;
        inner.entries.insert(key.to_string(), entry);
        let total = inner.entries.len();
        inner.stats.set_keys(total);
        Ok(next)
    }

    async fn rpush(&self, key: &str, item: &[u8]) -> Result<usize> {
        Self::validate(key, item)?;

        let mut inner = self.inner.write().await;

        if !inner.purge_if_expired(key) {
            inner.entries.insert(
                key.to_string(),
                Entry::new(Value::List(vec![item.to_vec()]), None),
            );
            let total = inner.entries.len();
            inner.stats.set_keys(total);
            return Ok(1);
        }

        match inner.entries.get_mut(key) {
            Some(entry) => match &mut entry.value {
                Value::List(items) => {
                    items.push(item.to_vec());
                    Ok(items.len())
                }
                Value::Raw(_) => Err(CacheError::WrongType(key.to_string())),
            },
            None => Err(CacheError::Internal(format!("entry vanished: {}", key))),
        }
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let mut inner = self.inner.write().await;

        if !inner.purge_if_expired(key) {
            return Ok(Vec::new());
        }

        match inner.entries.get(key).map(|entry| &entry.value) {
            Some(Value::List(items)) => Ok(match normalize_range(start, stop, items.len()) {
                Some((lo, hi)) => items[lo..hi].to_vec(),
                None => Vec::new(),
            }),
            Some(Value::Raw(_)) => Err(CacheError::WrongType(key.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn flushdb(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        inner.stats.set_keys(0);
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_store_new() {
        let store = MemoryStore::new();
        assert_eq!(store.len().await, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_set_and_get() {
        let store = MemoryStore::new();

        store.set("key1", b"value1").await.unwrap();
        let value = store.get("key1").await.unwrap();

        assert_eq!(value, Some(b"value1".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_get_nonexistent() {
        let store = MemoryStore::new();

        let result = store.get("nonexistent").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_store_overwrite() {
        let store = MemoryStore::new();

        store.set("key1", b"value1").await.unwrap();
        store.set("key1", b"value2").await.unwrap();

        let value = store.get("key1").await.unwrap();
        assert_eq!(value, Some(b"value2".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_setex_expiration() {
        let store = MemoryStore::new();

        store.setex("key1", 1, b"value1").await.unwrap();

        // Should be accessible immediately
        assert!(store.get("key1").await.unwrap().is_some());

        // Wait for expiration
        sleep(Duration::from_millis(1100)).await;

        // Expired entry reads as absent
        assert!(store.get("key1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_incr_from_zero() {
        let store = MemoryStore::new();

        assert_eq!(store.incr("counter").await.unwrap(), 1);
        assert_eq!(store.incr("counter").await.unwrap(), 2);
        assert_eq!(store.incr("counter").await.unwrap(), 3);

        let raw = store.get("counter").await.unwrap().unwrap();
        assert_eq!(raw, b"3".to_vec());
    }

    #[tokio::test]
    async fn test_store_incr_existing_integer() {
        let store = MemoryStore::new();

        store.set("counter", b"41").await.unwrap();
        assert_eq!(store.incr("counter").await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_store_incr_at_max_errors() {
        let store = MemoryStore::new();

        store
            .set("counter", i64::MAX.to_string().as_bytes())
            .await
            .unwrap();
        let result = store.incr("counter").await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_store_incr_non_integer() {
        let store = MemoryStore::new();

        store.set("key1", b"not a number").await.unwrap();
        let result = store.incr("key1").await;
        assert!(matches!(result, Err(CacheError::WrongType(_))));
    }

    #[tokio::test]
    async fn test_store_rpush_and_lrange() {
        let store = MemoryStore::new();

        assert_eq!(store.rpush("list", b"a").await.unwrap(), 1);
        assert_eq!(store.rpush("list", b"b").await.unwrap(), 2);
        assert_eq!(store.rpush("list", b"c").await.unwrap(), 3);

        let items = store.lrange("list", 0, -1).await.unwrap();
        assert_eq!(items, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[tokio::test]
    async fn test_store_lrange_subrange() {
        let store = MemoryStore::new();

        for item in [b"a", b"b", b"c", b"d"] {
            store.rpush("list", item).await.unwrap();
        }

        let items = store.lrange("list", 1, 2).await.unwrap();
        assert_eq!(items, vec![b"b".to_vec(), b"c".to_vec()]);

        let items = store.lrange("list", -2, -1).await.unwrap();
        assert_eq!(items, vec![b"c".to_vec(), b"d".to_vec()]);
    }

    #[tokio::test]
    async fn test_store_lrange_absent_key() {
        let store = MemoryStore::new();
        assert!(store.lrange("nope", 0, -1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_lrange_out_of_bounds() {
        let store = MemoryStore::new();
        store.rpush("list", b"a").await.unwrap();

        assert!(store.lrange("list", 5, 10).await.unwrap().is_empty());
        assert!(store.lrange("list", 1, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_wrong_type_scalar_vs_list() {
        let store = MemoryStore::new();

        store.set("scalar", b"v").await.unwrap();
        assert!(matches!(
            store.rpush("scalar", b"x").await,
            Err(CacheError::WrongType(_))
        ));

        store.rpush("list", b"x").await.unwrap();
        assert!(matches!(
            store.get("list").await,
            Err(CacheError::WrongType(_))
        ));
        assert!(matches!(
            store.lrange("scalar", 0, -1).await,
            Err(CacheError::WrongType(_))
        ));
    }

    #[tokio::test]
    async fn test_store_flushdb() {
        let store = MemoryStore::new();

        store.set("key1", b"v1").await.unwrap();
        store.rpush("list", b"a").await.unwrap();
        store.incr("counter").await.unwrap();

        store.flushdb().await.unwrap();

        assert!(store.is_empty().await);
        assert!(store.get("key1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_stats() {
        let store = MemoryStore::new();

        store.set("key1", b"value1").await.unwrap();
        store.get("key1").await.unwrap(); // hit
        store.get("nonexistent").await.unwrap(); // miss

        let stats = store.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.keys, 1);
    }

    #[tokio::test]
    async fn test_store_sweep_expired() {
        let store = MemoryStore::new();

        store.setex("key1", 1, b"value1").await.unwrap();
        store.setex("key2", 10, b"value2").await.unwrap();

        // Wait for key1 to expire
        sleep(Duration::from_millis(1100)).await;

        let removed = store.sweep_expired().await;
        assert_eq!(removed, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get("key2").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_store_key_too_long() {
        let store = MemoryStore::new();
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);

        let result = store.set(&long_key, b"value").await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_store_value_too_large() {
        let store = MemoryStore::new();
        let large_value = vec![b'x'; MAX_VALUE_SIZE + 1];

        let result = store.set("key", &large_value).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize_range(0, -1, 3), Some((0, 3)));
        assert_eq!(normalize_range(1, 1, 3), Some((1, 2)));
        assert_eq!(normalize_range(-2, -1, 3), Some((1, 3)));
        assert_eq!(normalize_range(0, 10, 3), Some((0, 3)));
        assert_eq!(normalize_range(3, 5, 3), None);
        assert_eq!(normalize_range(2, 1, 3), None);
        assert_eq!(normalize_range(0, -1, 0), None);
    }
}
