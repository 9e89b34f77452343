//! Shared Store Module
//!
//! Thread-safe handle to a [`CacheStore`]. Every operation, including the
//! statistics snapshot, runs under one mutex scoped to the store instance.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::error;

use crate::cache::{CacheKey, CacheStats, CacheStore, SetOutcome};
use crate::error::{CacheError, Result};
use crate::payload::Payload;

// == Shared Store ==
/// Cloneable, lock-guarded cache store.
///
/// Critical sections never await, so a blocking mutex is used even from
/// async callers. A writer that panicked may have left the store half
/// updated, so a poisoned lock resets the store and clears the poison. The
/// call that finds it fails with [`CacheError::Internal`]; later calls see
/// an empty, consistent store.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<CacheStore>>,
}

impl SharedStore {
    // == Constructor ==
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Builds the store and wraps it in one step.
    pub fn with_capacity(max_entries: usize, max_bytes: u64) -> Result<Self> {
        CacheStore::new(max_entries, max_bytes).map(Self::new)
    }

    pub fn get(&self, key: &CacheKey) -> Result<Option<Payload>> {
        Ok(self.lock()?.get(key))
    }

    pub fn set(&self, key: CacheKey, value: Payload) -> Result<SetOutcome> {
        Ok(self.lock()?.set(key, value))
    }

    pub fn remove(&self, key: &CacheKey) -> Result<Option<Payload>> {
        Ok(self.lock()?.remove(key))
    }

    pub fn clear(&self) -> Result<usize> {
        Ok(self.lock()?.clear())
    }

    pub fn snapshot_stats(&self) -> Result<CacheStats> {
        Ok(self.lock()?.snapshot_stats())
    }

    fn lock(&self) -> Result<MutexGuard<'_, CacheStore>> {
        match self.inner.lock() {
            Ok(guard) => Ok(guard),
            Err(poisoned) => {
                let dropped = poisoned.into_inner().clear();
                self.inner.clear_poison();
                error!(dropped, "Cache lock poisoned, store reset");
                Err(CacheError::Internal(
                    "cache lock poisoned, store reset".to_string(),
                ))
            }
        }
    }

    /// Poisons the lock by panicking while holding it.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let inner = Arc::clone(&self.inner);
        let _ = std::thread::spawn(move || {
            let _guard = inner.lock();
            panic!("poisoning cache lock");
        })
        .join();
    }
}
