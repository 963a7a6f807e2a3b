//! Tracecache - An instrumented caching layer
//!
//! Stores values under generated keys with per-operation call counting,
//! history recording and replay, plus a TTL page cache with
//! access-frequency tracking.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, PageCache, ReplayEngine, StoredValue};
pub use config::Config;
pub use store::{KeyValueStore, MemoryStore};
pub use tasks::spawn_cleanup_task;
