//! Store Statistics Module
//!
//! Tracks store performance metrics including hits, misses, and expirations.

use serde::Serialize;

// == Store Stats ==
/// Tracks store performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of reads that found a live entry
    pub hits: u64,
    /// Number of reads that found nothing (absent or expired key)
    pub misses: u64,
    /// Number of entries removed after their TTL elapsed
    pub expired: u64,
    /// Current number of keys in the store
    pub keys: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the read hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Expired ==
    /// Increments the expiration counter.
    pub fn record_expired(&mut self) {
        self.expired += 1;
    }

    // == Update Key Count ==
    /// Updates the current key count.
    pub fn set_keys(&mut self, count: usize) {
        self.keys = count;
    }
}
