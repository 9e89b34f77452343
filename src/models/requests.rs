//! Request DTOs for the prediction API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::{CacheKey, MAX_KEY_LENGTH};
use crate::payload::Payload;

/// Request body for POST /predict
///
/// # Fields
/// - `input`: The model input
/// - `cache_key`: Optional fingerprint; without it the cache is bypassed
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    /// The model input
    pub input: Payload,
    /// Optional cache fingerprint
    #[serde(default)]
    pub cache_key: Option<String>,
}

impl PredictRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match &self.cache_key {
            Some(key) if key.is_empty() => Some("Cache key cannot be empty".to_string()),
            Some(key) if key.len() > MAX_KEY_LENGTH => Some(format!(
                "Cache key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )),
            _ => self.input.check_shape().err(),
        }
    }

    pub fn key(&self) -> Option<CacheKey> {
        self.cache_key.clone().map(CacheKey::from)
    }
}
