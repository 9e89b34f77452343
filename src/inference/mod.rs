//! Inference Module
//!
//! The external model collaborator seen by the prediction service. Backends
//! may block for a long time and may fail; they know nothing about caching.

mod http;

use async_trait::async_trait;

use crate::error::InferenceError;
use crate::payload::Payload;

pub use http::HttpInferenceBackend;

/// Capability to compute a prediction for an input.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Runs the model on `input`.
    async fn infer(&self, input: &Payload) -> Result<Payload, InferenceError>;
}
