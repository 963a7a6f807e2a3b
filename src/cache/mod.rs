//! Cache Module
//!
//! The instrumented caching engine: value storage under generated keys,
//! per-operation call counting and history, replay, and the TTL page cache.

mod history;
mod instrumented;
mod page;
mod replay;
mod value;


// Re-export public types
pub use history::{inputs_key, outputs_key, CallCounter, HistoryRecorder};
pub use instrumented::{Cache, Instrumentation, STORE_OP};
pub use page::{count_key, page_key, Fetcher, HttpFetcher, PageCache, DEFAULT_PAGE_TTL};
pub use replay::ReplayEngine;
pub use value::{decode_int, decode_str, StoredValue};
