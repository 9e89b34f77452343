//! API Handlers
//!
//! HTTP request handlers for each prediction service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{CacheKey, SharedStore};
use crate::config::Config;
use crate::error::{ApiError, CacheError};
use crate::inference::InferenceBackend;
use crate::models::{
    ClearResponse, HealthResponse, PredictRequest, PredictResponse, RemoveResponse,
    StatsResponse,
};
use crate::service::PredictionService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached prediction service
    pub service: PredictionService,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    pub fn new(service: PredictionService) -> Self {
        Self { service }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if the configured capacities are invalid.
    pub fn from_config(
        config: &Config,
        backend: Arc<dyn InferenceBackend>,
    ) -> Result<Self, CacheError> {
        let store = SharedStore::with_capacity(config.max_entries, config.max_bytes)?;
        let mut service = PredictionService::new(store, backend);
        if let Some(timeout) = config.inference_timeout() {
            service = service.with_timeout(timeout);
        }
        Ok(Self::new(service))
    }
}

/// Handler for POST /predict
///
/// Runs the model on the input, consulting the cache when a key is given.
pub async fn predict_handler(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let output = state.service.predict(&req.input, req.key()).await?;
    Ok(Json(PredictResponse::new(output)))
}

/// Handler for DELETE /cache/:key
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<RemoveResponse>, ApiError> {
    match state.service.store().remove(&CacheKey::from(key.as_str()))? {
        Some(_) => Ok(Json(RemoveResponse::new(key))),
        None => Err(ApiError::NotFound(key)),
    }
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>, ApiError> {
    let removed = state.service.store().clear()?;
    Ok(Json(ClearResponse { removed }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.service.snapshot_stats()?;
    Ok(Json(StatsResponse::from(stats)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
