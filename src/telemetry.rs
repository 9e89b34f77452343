//! Telemetry metric names and publishing.
//!
//! Metrics go through the `metrics` facade. The binary or embedding
//! application installs its own recorder (prometheus, statsd, ...); without
//! one every call is a no-op.
//!
//! Counters end in `_total`; byte gauges end in `_bytes`.

use crate::cache::CacheStats;

/// Successful predictions, cached or computed.
pub const PREDICTIONS_TOTAL: &str = "inference_predictions_total";

/// Failed inference calls.
///
/// Labels: `reason` ("backend" | "transport" | "timeout").
pub const INFERENCE_ERRORS_TOTAL: &str = "inference_errors_total";

/// Cache lookups that found a value.
pub const CACHE_HITS_TOTAL: &str = "inference_cache_hits_total";

/// Cache lookups that found nothing.
pub const CACHE_MISSES_TOTAL: &str = "inference_cache_misses_total";

/// Entries evicted to make room.
pub const CACHE_EVICTIONS_TOTAL: &str = "inference_cache_evictions_total";

/// Values refused because they exceed the whole byte budget.
pub const CACHE_REJECTED_TOTAL: &str = "inference_cache_rejected_too_large_total";

/// Values sized by the fallback probe.
pub const CACHE_FALLBACK_ESTIMATES_TOTAL: &str = "inference_cache_fallback_estimates_total";

/// Bytes currently held by cached entries.
pub const CACHE_CURRENT_BYTES: &str = "inference_cache_current_bytes";

/// Entries currently held.
pub const CACHE_ENTRIES: &str = "inference_cache_entries";

/// hits / (hits + misses).
pub const CACHE_HIT_RATIO: &str = "inference_cache_hit_ratio";

/// Publishes a statistics snapshot.
///
/// Store counters are monotonic, so they are exported as absolute counter
/// values rather than increments.
pub fn publish_stats(stats: &CacheStats) {
    metrics::counter!(CACHE_HITS_TOTAL).absolute(stats.hits);
    metrics::counter!(CACHE_MISSES_TOTAL).absolute(stats.misses);
    metrics::counter!(CACHE_EVICTIONS_TOTAL).absolute(stats.evictions);
    metrics::counter!(CACHE_REJECTED_TOTAL).absolute(stats.rejected_too_large);
    metrics::counter!(CACHE_FALLBACK_ESTIMATES_TOTAL).absolute(stats.fallback_estimates);
    metrics::gauge!(CACHE_CURRENT_BYTES).set(stats.current_bytes as f64);
    metrics::gauge!(CACHE_ENTRIES).set(stats.total_entries as f64);
    metrics::gauge!(CACHE_HIT_RATIO).set(stats.hit_rate());
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};
    use metrics_util::MetricKind;

    #[test]
    fn test_publish_stats_exports_counters_and_gauges() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        let stats = CacheStats {
            hits: 3,
            misses: 1,
            evictions: 2,
            rejected_too_large: 1,
            fallback_estimates: 0,
            current_bytes: 700,
            total_entries: 2,
        };
        metrics::with_local_recorder(&recorder, || publish_stats(&stats));

        let snapshot = snapshotter.snapshot().into_vec();
        let find = |kind: MetricKind, name: &str| {
            snapshot
                .iter()
                .find(|(key, _, _, _)| key.kind() == kind && key.key().name() == name)
                .map(|(_, _, _, value)| value.clone())
        };

        assert_eq!(
            find(MetricKind::Counter, CACHE_HITS_TOTAL),
            Some(DebugValue::Counter(3)).as_ref()
        );
        assert_eq!(
            find(MetricKind::Counter, CACHE_EVICTIONS_TOTAL),
            Some(DebugValue::Counter(2)).as_ref()
        );
        match find(MetricKind::Gauge, CACHE_CURRENT_BYTES) {
            Some(DebugValue::Gauge(v)) => assert_eq!(v.into_inner(), 700.0),
            other => panic!("unexpected gauge value: {other:?}"),
        }
        match find(MetricKind::Gauge, CACHE_HIT_RATIO) {
            Some(DebugValue::Gauge(v)) => assert!((v.into_inner() - 0.75).abs() < 1e-9),
            other => panic!("unexpected gauge value: {other:?}"),
        }
    }
}
