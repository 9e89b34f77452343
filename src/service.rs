//! Prediction Service
//!
//! Wraps an [`InferenceBackend`] with optional caching. The cache is only
//! an optimization: its faults are logged and treated as misses, while
//! inference faults reach the caller unchanged.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::cache::{CacheKey, CacheStats, SetOutcome, SharedStore};
use crate::error::{CacheError, InferenceError};
use crate::inference::InferenceBackend;
use crate::payload::Payload;
use crate::telemetry;

// == Prediction Service ==
/// Cloneable handle shared by every request handler.
#[derive(Clone)]
pub struct PredictionService {
    store: SharedStore,
    backend: Arc<dyn InferenceBackend>,
    timeout: Option<Duration>,
}

impl PredictionService {
    // == Constructor ==
    pub fn new(store: SharedStore, backend: Arc<dyn InferenceBackend>) -> Self {
        Self {
            store,
            backend,
            timeout: None,
        }
    }

    /// Bounds every inference call. A call that exceeds it fails with
    /// [`InferenceError::Timeout`] and leaves the cache untouched.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    // == Predict ==
    /// Returns the prediction for `input`.
    ///
    /// Without a key the cache is bypassed and no statistics move. With a
    /// key, a hit returns the stored value without calling the backend; a
    /// miss computes outside the store lock and stores the result.
    pub async fn predict(
        &self,
        input: &Payload,
        cache_key: Option<CacheKey>,
    ) -> Result<Payload, InferenceError> {
        let Some(key) = cache_key else {
            let output = self.infer(input).await?;
            metrics::counter!(telemetry::PREDICTIONS_TOTAL).increment(1);
            return Ok(output);
        };

        match self.store.get(&key) {
            Ok(Some(cached)) => {
                debug!(key = %key, "Cache hit");
                self.finish_prediction();
                return Ok(cached);
            }
            Ok(None) => debug!(key = %key, "Cache miss"),
            Err(e) => self.log_cache_fault("lookup", &key, &e),
        }

        let output = self.infer(input).await?;

        match self.store.set(key.clone(), output.clone()) {
            Ok(SetOutcome::Inserted { evicted }) if evicted > 0 => {
                debug!(key = %key, evicted, "Stored prediction after eviction");
            }
            Ok(_) => {}
            Err(e) => self.log_cache_fault("insert", &key, &e),
        }

        self.finish_prediction();
        Ok(output)
    }

    // == Stats ==
    pub fn snapshot_stats(&self) -> Result<CacheStats, CacheError> {
        self.store.snapshot_stats()
    }

    // == Cleanup ==
    /// Drops all cached predictions, typically at shutdown.
    pub fn cleanup(&self) {
        match self.store.clear() {
            Ok(removed) => info!(removed, "Cleared prediction cache"),
            Err(e) => error!(error = %e, "Failed to clear prediction cache"),
        }
    }

    async fn infer(&self, input: &Payload) -> Result<Payload, InferenceError> {
        let call = self.backend.infer(input);
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(InferenceError::Timeout(limit)),
            },
            None => call.await,
        };

        if let Err(e) = &result {
            let reason = match e {
                InferenceError::Backend(_) => "backend",
                InferenceError::Transport(_) => "transport",
                InferenceError::Timeout(_) => "timeout",
            };
            metrics::counter!(telemetry::INFERENCE_ERRORS_TOTAL, "reason" => reason).increment(1);
            warn!(backend = self.backend.name(), error = %e, "Inference failed");
        }
        result
    }

    fn finish_prediction(&self) {
        metrics::counter!(telemetry::PREDICTIONS_TOTAL).increment(1);
        if let Ok(stats) = self.store.snapshot_stats() {
            telemetry::publish_stats(&stats);
        }
    }

    fn log_cache_fault(&self, operation: &'static str, key: &CacheKey, err: &CacheError) {
        error!(operation, key = %key, error = %err, "Cache fault, continuing without cache");
    }
}
