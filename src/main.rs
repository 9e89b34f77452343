//! Inference Cache - memory-bounded prediction cache
//!
//! Serves model predictions through an LRU cache bounded by entry count and
//! total bytes, in front of an upstream inference server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inference_cache::api::create_router;
use inference_cache::inference::HttpInferenceBackend;
use inference_cache::{spawn_metrics_task, AppState, Config};

/// Main entry point for the prediction cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create the cache store and prediction service
/// 4. Start the background metrics publisher
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM, then clear the cache
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inference_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting prediction cache server");

    let config = Config::from_env().context("invalid configuration")?;
    info!(
        "Configuration loaded: max_entries={}, max_bytes={}, port={}, inference_url={}",
        config.max_entries, config.max_bytes, config.server_port, config.inference_url
    );

    let backend = Arc::new(HttpInferenceBackend::new(config.inference_url.clone()));
    let state = AppState::from_config(&config, backend).context("invalid cache capacity")?;
    info!("Prediction cache initialized");

    let metrics_handle =
        spawn_metrics_task(state.service.store().clone(), config.metrics_interval_secs);
    info!("Background metrics publisher started");

    let service = state.service.clone();
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(metrics_handle))
        .await
        .context("server error")?;

    service.cleanup();
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the metrics task and allows graceful shutdown.
async fn shutdown_signal(metrics_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    metrics_handle.abort();
    warn!("Metrics publisher aborted");
}
