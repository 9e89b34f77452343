//! Inference Cache - memory-bounded prediction cache
//!
//! Serves model predictions through an LRU cache bounded by entry count and
//! total bytes, in front of an external inference backend.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod inference;
pub mod models;
pub mod payload;
pub mod service;
pub mod tasks;
pub mod telemetry;

pub use api::AppState;
pub use cache::{CacheKey, CacheStats, SharedStore};
pub use config::Config;
pub use payload::Payload;
pub use service::PredictionService;
pub use tasks::spawn_metrics_task;
