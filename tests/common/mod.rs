//! Common test utilities for surfsup.
//!
//! Fixture databases, a server launcher and HTTP client helpers.

#![allow(dead_code)]

pub mod http_client;
pub mod test_data;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use surfsup::config::{Config, DatabaseConfig};
use surfsup::{build_router, AppState};

/// Build the shared state for a fixture database
pub fn test_state(database: &Path) -> Arc<AppState> {
    let config = Config {
        database: DatabaseConfig {
            path: database.to_path_buf(),
            busy_timeout_ms: 1000,
        },
        ..Default::default()
    };
    AppState::initialize(config).expect("Failed to open fixture database")
}

/// Serve a fixture database on an ephemeral local port
pub async fn start_test_server(database: &Path) -> SocketAddr {
    let app = build_router(test_state(database));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    addr
}
