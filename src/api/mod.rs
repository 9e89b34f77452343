//! API Module
//!
//! HTTP handlers and routing for the prediction service.
//!
//! # Endpoints
//! - `POST /predict` - Run a prediction, optionally cached
//! - `GET /stats` - Get cache statistics
//! - `DELETE /cache/:key` - Drop one cached prediction
//! - `DELETE /cache` - Drop all cached predictions
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
