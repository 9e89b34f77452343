//! Metrics Publisher Task
//!
//! Background task that periodically exports the cache statistics snapshot
//! to the installed metrics recorder.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::cache::{CacheStats, SharedStore};
use crate::telemetry;

/// Publishes one snapshot. Returns it, or None if the store is unreadable.
pub fn publish_once(store: &SharedStore) -> Option<CacheStats> {
    match store.snapshot_stats() {
        Ok(stats) => {
            telemetry::publish_stats(&stats);
            Some(stats)
        }
        Err(e) => {
            error!(error = %e, "Failed to snapshot cache statistics");
            None
        }
    }
}

/// Spawns a background task that publishes cache statistics.
///
/// The task runs until aborted, sleeping for `interval_secs` between
/// snapshots.
///
/// # Example
/// ```ignore
/// let store = SharedStore::with_capacity(1000, 1 << 30)?;
/// let handle = spawn_metrics_task(store.clone(), 15);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_metrics_task(store: SharedStore, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting metrics publisher with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            if let Some(stats) = publish_once(&store) {
                debug!(
                    hits = stats.hits,
                    misses = stats.misses,
                    evictions = stats.evictions,
                    current_bytes = stats.current_bytes,
                    entries = stats.total_entries,
                    "Published cache statistics"
                );
            }
        }
    })
}
