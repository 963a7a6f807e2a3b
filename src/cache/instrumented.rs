//! Instrumented Cache Module
//!
//! Stores arbitrary values under generated keys and, when enabled, routes
//! every store through the call counter and history recorder.

use uuid::Uuid;

use crate::cache::history::{CallCounter, HistoryRecorder};
use crate::cache::value::{decode_int, decode_str, StoredValue};
use crate::error::Result;
use crate::store::KeyValueStore;

// == Operation Identity ==
/// Stable identity of the store operation, used as the counter key and
/// the prefix of the history log keys.
pub const STORE_OP: &str = "Cache::store";

// == Instrumentation Flags ==
/// Controls which observers wrap the store operation.
#[derive(Debug, Clone, Copy)]
pub struct Instrumentation {
    /// Count invocations under the operation identity
    pub counting: bool,
    /// Record per-invocation argument and result logs
    pub history: bool,
}

impl Default for Instrumentation {
    fn default() -> Self {
        Self {
            counting: true,
            history: true,
        }
    }
}

// == Cache ==
/// Instrumented value cache over a key-value store.
///
/// The store handle is injected; the cache does not own its lifecycle
/// beyond this instance.
pub struct Cache<S: KeyValueStore> {
    store: S,
    instrumentation: Instrumentation,
}

impl<S: KeyValueStore> Cache<S> {
    // == Constructors ==
    /// Creates a cache over `store` with full instrumentation.
    ///
    /// Side effect: the store is flushed, destroying every existing key.
    /// Construction starts from a clean database by design; hand the cache
    /// a dedicated store if other keys must survive.
    pub async fn new(store: S) -> Result<Self> {
        Self::with_instrumentation(store, Instrumentation::default()).await
    }

    /// Creates a cache with explicit instrumentation flags.
    ///
    /// Flushes the store, like [`Cache::new`].
    pub async fn with_instrumentation(store: S, instrumentation: Instrumentation) -> Result<Self> {
        store.flushdb().await?;
        Ok(Self {
            store,
            instrumentation,
        })
    }

    /// Returns the underlying store handle.
    pub fn store_handle(&self) -> &S {
        &self.store
    }

    // == Store ==
    /// Stores a value under a freshly generated UUID key and returns the key.
    ///
    /// With counting enabled the operation counter increments exactly once
    /// per call; with history enabled the argument repr is appended to the
    /// input log before the write and the returned key to the output log
    /// after it. Composition order is count-then-log.
    pub async fn store(&self, value: StoredValue) -> Result<String> {
        let Instrumentation { counting, history } = self.instrumentation;
        let value = &value;

        match (counting, history) {
            (true, true) => {
                let counter = CallCounter::new(&self.store, STORE_OP);
                let recorder = HistoryRecorder::new(&self.store, STORE_OP);
                let args = format!("({})", value.repr());
                counter
                    .observe(move || async move {
                        recorder
                            .observe(args, move || self.write_fresh(value))
                            .await
                    })
                    .await
            }
            (true, false) => {
                CallCounter::new(&self.store, STORE_OP)
                    .observe(move || self.write_fresh(value))
                    .await
            }
            (false, true) => {
                let args = format!("({})", value.repr());
                HistoryRecorder::new(&self.store, STORE_OP)
                    .observe(args, move || self.write_fresh(value))
                    .await
            }
            (false, false) => self.write_fresh(value).await,
        }
    }

    /// Generates a fresh key and writes the serialized value under it.
    async fn write_fresh(&self, value: &StoredValue) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, &value.to_bytes()).await?;
        Ok(key)
    }

    // == Get ==
    /// Retrieves the value under `key`, reinterpreted through `convert`.
    ///
    /// Returns `Ok(None)` for an absent key; never an error. `convert`
    /// must be pure; its error propagates to the caller and leaves the
    /// cache untouched.
    pub async fn get<T, F>(&self, key: &str, convert: F) -> Result<Option<T>>
    where
        F: FnOnce(&[u8]) -> Result<T>,
    {
        match self.store.get(key).await? {
            Some(bytes) => Ok(Some(convert(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Retrieves the raw bytes under `key`.
    pub async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.get(key, |bytes| Ok(bytes.to_vec())).await
    }

    /// Retrieves the value under `key` decoded as a UTF-8 string.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get(key, decode_str).await
    }

    /// Retrieves the value under `key` decoded as an integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get(key, decode_int).await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::history::{inputs_key, outputs_key};
    use crate::error::CacheError;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_store_get_round_trip() {
        let cache = Cache::new(MemoryStore::new()).await.unwrap();

        let key = cache.store(StoredValue::Str("hello".into())).await.unwrap();
        assert_eq!(cache.get_str(&key).await.unwrap(), Some("hello".into()));

        let key = cache.store(StoredValue::Int(42)).await.unwrap();
        assert_eq!(cache.get_int(&key).await.unwrap(), Some(42));

        let key = cache
            .store(StoredValue::Bytes(vec![1, 2, 3]))
            .await
            .unwrap();
        assert_eq!(cache.get_bytes(&key).await.unwrap(), Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_store_generates_distinct_keys() {
        let cache = Cache::new(MemoryStore::new()).await.unwrap();

        let k1 = cache.store(StoredValue::Str("a".into())).await.unwrap();
        let k2 = cache.store(StoredValue::Str("a".into())).await.unwrap();
        assert_ne!(k1, k2);
    }

    #[tokio::test]
    async fn test_get_absent_key_is_none() {
        let cache = Cache::new(MemoryStore::new()).await.unwrap();

        assert_eq!(cache.get_str("never-stored").await.unwrap(), None);
        assert_eq!(cache.get_int("never-stored").await.unwrap(), None);
        assert_eq!(cache.get_bytes("never-stored").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_convert_error_propagates() {
        let cache = Cache::new(MemoryStore::new()).await.unwrap();

        let key = cache.store(StoredValue::Str("text".into())).await.unwrap();
        let result = cache.get_int(&key).await;
        assert!(matches!(result, Err(CacheError::Decode(_))));

        // The stored value is unaffected by the failed decode
        assert_eq!(cache.get_str(&key).await.unwrap(), Some("text".into()));
    }

    #[tokio::test]
    async fn test_store_counts_and_logs_each_call() {
        let store = MemoryStore::new();
        let cache = Cache::new(store.clone()).await.unwrap();

        cache.store(StoredValue::Str("foo".into())).await.unwrap();
        cache.store(StoredValue::Str("bar".into())).await.unwrap();
        cache.store(StoredValue::Int(42)).await.unwrap();

        let count = store.get(STORE_OP).await.unwrap().unwrap();
        assert_eq!(count, b"3".to_vec());

        let inputs = store.lrange(&inputs_key(STORE_OP), 0, -1).await.unwrap();
        let outputs = store.lrange(&outputs_key(STORE_OP), 0, -1).await.unwrap();
        assert_eq!(inputs.len(), 3);
        assert_eq!(outputs.len(), 3);
        assert_eq!(inputs[0], b"(\"foo\")".to_vec());
        assert_eq!(inputs[2], b"(42)".to_vec());
    }

    #[tokio::test]
    async fn test_logged_output_is_the_returned_key() {
        let store = MemoryStore::new();
        let cache = Cache::new(store.clone()).await.unwrap();

        let key = cache.store(StoredValue::Str("foo".into())).await.unwrap();

        let outputs = store.lrange(&outputs_key(STORE_OP), 0, -1).await.unwrap();
        assert_eq!(outputs, vec![key.into_bytes()]);
    }

    #[tokio::test]
    async fn test_instrumentation_disabled_leaves_no_trace() {
        let store = MemoryStore::new();
        let cache = Cache::with_instrumentation(
            store.clone(),
            Instrumentation {
                counting: false,
                history: false,
            },
        )
        .await
        .unwrap();

        let key = cache.store(StoredValue::Str("foo".into())).await.unwrap();
        assert_eq!(cache.get_str(&key).await.unwrap(), Some("foo".into()));

        assert!(store.get(STORE_OP).await.unwrap().is_none());
        assert!(store
            .lrange(&inputs_key(STORE_OP), 0, -1)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_construction_flushes_store() {
        let store = MemoryStore::new();
        store.set("leftover", b"stale").await.unwrap();

        let cache = Cache::new(store.clone()).await.unwrap();

        assert!(store.get("leftover").await.unwrap().is_none());
        assert_eq!(cache.get_str("leftover").await.unwrap(), None);
    }
}
