//! Cache Statistics Module
//!
//! Tracks cache-aside outcomes: hits, misses, stores and store failures.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache-aside performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the store
    pub hits: u64,
    /// Lookups that fell through to the producer
    pub misses: u64,
    /// Produced bodies written back to the store
    pub stores: u64,
    /// Store reads that failed or returned an undecodable value
    pub read_errors: u64,
    /// Store writes that failed
    pub write_errors: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_store(&mut self) {
        self.stores += 1;
    }

    pub fn record_read_error(&mut self) {
        self.read_errors += 1;
    }

    pub fn record_write_error(&mut self) {
        self.write_errors += 1;
    }
}
