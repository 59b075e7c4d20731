//! surfsup - Hawaii climate API server
//!
//! This is the main entry point for the surfsup application.

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use surfsup::handlers::heartbeat::mark_start;
use surfsup::{build_router, init_tracing, log_error, AppState, Config, Result, SurfsUpError};

#[tokio::main]
async fn main() -> Result<()> {
    mark_start();

    // Configuration comes first so the subscriber gets the configured level
    let config = Config::load()?;
    init_tracing(&config.log_level);

    info!("Starting surfsup v{}", env!("CARGO_PKG_VERSION"));

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!("Opening database: {}", config.database.path.display());

    let state = AppState::initialize(config.clone()).map_err(|e| {
        log_error(&e, "database startup");
        e
    })?;

    let app = build_router(state);

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| SurfsUpError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Resolves on Ctrl+C, or on SIGTERM where the platform has it
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = signal::ctrl_c() => info!("Ctrl+C received, draining connections"),
                    _ = sigterm.recv() => info!("SIGTERM received, draining connections"),
                }
                return;
            }
            Err(e) => tracing::warn!("No SIGTERM handler ({}), only Ctrl+C stops the server", e),
        }
    }

    if let Err(e) = signal::ctrl_c().await {
        // Without a signal source the server runs until killed
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Ctrl+C received, draining connections");
}
