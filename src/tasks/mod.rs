//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Metrics publisher: exports cache statistics at configured intervals

mod publisher;

pub use publisher::{publish_once, spawn_metrics_task};
