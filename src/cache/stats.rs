//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, evictions and
//! byte usage.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals
    pub misses: u64,
    /// Number of entries evicted to make room for an insertion
    pub evictions: u64,
    /// Number of values refused because they alone exceed the byte budget
    pub rejected_too_large: u64,
    /// Number of values sized by the generic fallback probe
    pub fallback_estimates: u64,
    /// Sum of the sizes of all stored entries
    pub current_bytes: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
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
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
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

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejected_too_large += 1;
    }

    pub fn record_fallback_estimate(&mut self) {
        self.fallback_estimates += 1;
    }

    // == Usage ==
    /// Updates the usage gauges.
    pub fn set_usage(&mut self, entries: usize, bytes: u64) {
        self.total_entries = entries;
        self.current_bytes = bytes;
    }
}
