//! Heartbeat endpoint handler.
//!
//! Returns server status information: instance id, uptime and what the
//! database currently holds.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::logging::{generate_request_id, log_request_error};
use crate::models::DatasetSummary;
use crate::state::AppState;

/// Unique per process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Dataset information
    pub dataset: DatasetInfo,
    /// Server status
    pub status: String,
}

/// Dataset information structure
#[derive(Debug, Serialize)]
pub struct DatasetInfo {
    /// Database file path
    pub database_path: String,
    #[serde(flatten)]
    pub summary: DatasetSummary,
}

/// Touch the lazy statics so uptime counts from startup, not the first heartbeat
pub fn mark_start() {
    once_cell::sync::Lazy::force(&START_TIME);
    once_cell::sync::Lazy::force(&SERVER_ID);
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HeartbeatResponse>> {
    let request_id = generate_request_id();
    debug!(endpoint = "/heartbeat", request_id = %request_id, "Processing heartbeat");

    let summary = state.store.summary().await.map_err(|error| {
        log_request_error(&error, "/heartbeat", &request_id, None);
        error
    })?;

    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    Ok(Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        dataset: DatasetInfo {
            database_path: state.store.path().display().to_string(),
            summary,
        },
        status: "healthy".to_string(),
    }))
}
