//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and a byte
//! budget.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cache::size;
use crate::cache::{CacheEntry, CacheKey, CacheStats, LruTracker};
use crate::error::{CacheError, Result};
use crate::payload::Payload;

// == Set Outcome ==
/// What happened to a value handed to [`CacheStore::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// Stored as most recently used after evicting `evicted` entries
    Inserted { evicted: usize },
    /// Not stored: the value alone exceeds the byte budget
    Rejected { size_bytes: u64 },
}

// == Cache Store ==
/// Cache storage bounded by entry count and total bytes, evicting least
/// recently used entries first.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<CacheKey, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker<CacheKey>,
    /// Performance statistics
    stats: CacheStats,
    /// Sum of `size_bytes` over all entries
    current_bytes: u64,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Maximum total size of all entries
    max_bytes: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacities.
    ///
    /// Both capacities must be non-zero; a cache that can hold nothing is a
    /// configuration mistake, not a valid mode.
    pub fn new(max_entries: usize, max_bytes: u64) -> Result<Self> {
        if max_entries == 0 {
            return Err(CacheError::InvalidCapacity(
                "max_entries must be greater than zero".to_string(),
            ));
        }
        if max_bytes == 0 {
            return Err(CacheError::InvalidCapacity(
                "max_bytes must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            current_bytes: 0,
            max_entries,
            max_bytes,
        })
    }

    // == Get ==
    /// Retrieves a value by key, marking it most recently used.
    pub fn get(&mut self, key: &CacheKey) -> Option<Payload> {
        match self.entries.get(key) {
            Some(entry) => {
                let value = entry.value.clone();
                self.lru.touch(entry.slot);
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a value, evicting least recently used entries until it fits.
    ///
    /// An existing entry under the same key is dropped first. A value larger
    /// than the whole byte budget is rejected and leaves the key absent.
    pub fn set(&mut self, key: CacheKey, value: Payload) -> SetOutcome {
        let estimate = size::estimate(&value);
        if estimate.degraded {
            self.stats.record_fallback_estimate();
            debug!(
                key = %key,
                kind = value.kind(),
                bytes = estimate.bytes,
                "Sized value with fallback probe"
            );
        }

        self.remove_entry(&key);

        let size_bytes = estimate.bytes;
        if size_bytes > self.max_bytes {
            self.stats.record_rejection();
            warn!(
                key = %key,
                size_bytes,
                max_bytes = self.max_bytes,
                "Rejected value larger than cache budget"
            );
            return SetOutcome::Rejected { size_bytes };
        }

        let mut evicted = 0;
        while self.current_bytes + size_bytes > self.max_bytes
            || self.entries.len() >= self.max_entries
        {
            if !self.evict_oldest() {
                break;
            }
            evicted += 1;
        }

        let slot = self.lru.push_front(key.clone());
        self.entries.insert(key, CacheEntry::new(value, size_bytes, slot));
        self.current_bytes += size_bytes;

        debug_assert_eq!(self.entries.len(), self.lru.len());
        SetOutcome::Inserted { evicted }
    }

    // == Remove ==
    /// Removes an entry by key, returning its value.
    pub fn remove(&mut self, key: &CacheKey) -> Option<Payload> {
        self.remove_entry(key).map(|entry| entry.value)
    }

    // == Clear ==
    /// Drops every entry. Returns the number of entries removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.current_bytes = 0;
        count
    }

    // == Stats ==
    /// Returns a point-in-time copy of the statistics.
    pub fn snapshot_stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_usage(self.entries.len(), self.current_bytes);
        stats
    }

    // == Accessors ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_bytes(&self) -> u64 {
        self.current_bytes
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Checks presence without touching recency or statistics.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<CacheKey> {
        self.lru.iter().cloned().collect()
    }

    fn remove_entry(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(entry.slot);
        self.current_bytes -= entry.size_bytes;
        Some(entry)
    }

    fn evict_oldest(&mut self) -> bool {
        let Some(key) = self.lru.evict_oldest() else {
            return false;
        };
        if let Some(entry) = self.entries.remove(&key) {
            self.current_bytes -= entry.size_bytes;
            debug!(key = %key, size_bytes = entry.size_bytes, "Evicted entry");
        }
        self.stats.record_eviction();
        true
    }
}
