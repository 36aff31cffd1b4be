//! twitch_kit cache inspector
//!
//! Runs an entity cache with the configured bounds and serves it read-only
//! over HTTP. Nothing feeds the cache while it runs; set
//! `INSPECTOR_SEED_FILE` to preload a recorded batch of chat events.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use twitch_kit::api::{create_router, AppState};
use twitch_kit::{CacheSeed, Config, LogManager};

/// Main entry point for the cache inspector.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the log manager and entity cache
/// 4. Preload the cache from the seed file, if configured
/// 5. Serve the inspector router on the configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "twitch_kit=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: message_cache_size={:?}, log_level={}, port={}",
        config.message_cache_size, config.log_level, config.inspector_port
    );

    let logs = Arc::new(LogManager::new(config.log_level));
    logs.write_initial_log();

    let state = AppState::from_config(&config);
    if let Some(path) = &config.seed_file {
        let summary = CacheSeed::load(path)?.apply(&state.cache);
        info!(?summary, path = %path.display(), "Cache seeded");
    }
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.inspector_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    logs.create_logger("Inspector")
        .info(&format!("Listening on http://{}", addr));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("inspector server failed")?;

    info!("Inspector shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
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
}
