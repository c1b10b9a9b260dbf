//! Mini OTP - A lightweight one-time-password server
//!
//! Issues, stores and validates short-lived OTP codes over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_otp::api::create_router;
use mini_otp::notify::LogNotifier;
use mini_otp::{spawn_cleanup_task, spawn_delivery_worker, AppState, Config};

/// Main entry point for the Mini OTP server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Start the delivery worker in front of the log notifier
/// 4. Build the OTP engine over the in-memory cache
/// 5. Start background TTL cleanup task
/// 6. Serve the Axum router until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_otp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mini OTP Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: otp_length={}, otp_expires={}m, max_entries={}, port={}, cleanup_interval={}s",
        config.otp_length,
        config.otp_expires,
        config.max_entries,
        config.server_port,
        config.cleanup_interval
    );

    let (notifier, delivery_handle) =
        spawn_delivery_worker(Arc::new(LogNotifier::new()), config.delivery_queue);

    let state = AppState::from_config(&config, Arc::new(notifier))
        .context("invalid OTP configuration")?;
    info!("OTP engine initialized");

    let cleanup_handle = spawn_cleanup_task(state.cache.clone(), config.cleanup_interval);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    // The router (and its notifier senders) is gone; let queued messages drain
    if let Err(err) = delivery_handle.await {
        warn!("Delivery worker ended abnormally: {}", err);
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the cleanup task.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
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

    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
