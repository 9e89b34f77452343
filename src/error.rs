//! Error types for the prediction cache
//!
//! Provides unified error handling using thiserror. Cache faults and
//! inference faults are kept apart: only [`InferenceError`] ever reaches a
//! caller of `predict`.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Faults raised by the bounded store or its lock.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity of zero entries or zero bytes
    #[error("invalid cache capacity: {0}")]
    InvalidCapacity(String),

    /// Lock poisoned or bookkeeping out of sync
    #[error("cache internal error: {0}")]
    Internal(String),
}

// == Inference Error Enum ==
/// Failures of the external inference collaborator.
///
/// These are propagated to the caller unchanged and never cached.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// The backend rejected the input or failed while computing
    #[error("inference backend error: {0}")]
    Backend(String),

    /// Transport failure talking to a remote backend
    #[error("inference transport error: {0}")]
    Transport(String),

    /// The call did not finish within the configured timeout
    #[error("inference timed out after {0:?}")]
    Timeout(Duration),
}

// == Config Error Enum ==
/// Invalid startup configuration. Always fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error(transparent)]
    Capacity(#[from] CacheError),
}

// == API Error Enum ==
/// Errors surfaced by the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key not present in the cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Inference failed for this request
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// Cache fault on an explicit cache endpoint
    #[error(transparent)]
    Cache(#[from] CacheError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Inference(InferenceError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Inference(_) => StatusCode::BAD_GATEWAY,
            ApiError::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, CacheError>;
