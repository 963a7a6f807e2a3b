//! Call Instrumentation Module
//!
//! Composable wrappers that observe an operation: `CallCounter` tracks how
//! many times it ran, `HistoryRecorder` keeps ordered input/output logs.
//!
//! Each wrapper is constructed over a store handle and an explicit,
//! stable identity string; the identity must be the same across all
//! invocations of one operation and distinct across operations. Wrappers
//! compose by closure nesting. The crate's fixed composition order is
//! count-then-log: the counter increments before the input log entry is
//! appended.

use std::fmt;
use std::future::Future;

use crate::error::Result;
use crate::store::KeyValueStore;

// == Log Keys ==
/// Store key holding the ordered argument log for an operation.
pub fn inputs_key(identity: &str) -> String {
    format!("{}:inputs", identity)
}

/// Store key holding the ordered result log for an operation.
pub fn outputs_key(identity: &str) -> String {
    format!("{}:outputs", identity)
}

// == Call Counter ==
/// Counts invocations of an operation under its identity key.
///
/// The counter increments before the wrapped operation runs, so a failing
/// operation is still counted; an invocation is only missed if it never
/// reaches the wrapper at all.
pub struct CallCounter<'a, S: KeyValueStore> {
    store: &'a S,
    identity: &'a str,
}

impl<'a, S: KeyValueStore> CallCounter<'a, S> {
    pub fn new(store: &'a S, identity: &'a str) -> Self {
        Self { store, identity }
    }

    /// Increments the counter, then runs `op`, propagating its outcome.
    pub async fn observe<F, Fut, T>(&self, op: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.store.incr(self.identity).await?;
        op().await
    }

    /// Reads the current count; an absent counter reads as zero.
    pub async fn count(&self) -> Result<u64> {
        match self.store.get(self.identity).await? {
            Some(bytes) => Ok(crate::cache::value::decode_int(&bytes)?.max(0) as u64),
            None => Ok(0),
        }
    }
}

// == History Recorder ==
/// Appends an operation's arguments and result to ordered per-identity logs.
///
/// Recording order is: log input, run the operation, log output, return.
/// An operation that fails leaves an input entry with no matching output;
/// that length mismatch is deliberately observable and never repaired.
pub struct HistoryRecorder<'a, S: KeyValueStore> {
    store: &'a S,
    identity: &'a str,
}

impl<'a, S: KeyValueStore> HistoryRecorder<'a, S> {
    pub fn new(store: &'a S, identity: &'a str) -> Self {
        Self { store, identity }
    }

    /// Logs `args`, runs `op`, logs its result on success.
    pub async fn observe<F, Fut, T>(&self, args: String, op: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
        T: fmt::Display,
    {
        self.store
            .rpush(&inputs_key(self.identity), args.as_bytes())
            .await?;

        let result = op().await?;

        self.store
            .rpush(&outputs_key(self.identity), result.to_string().as_bytes())
            .await?;

        Ok(result)
    }
}
