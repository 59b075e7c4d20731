//! Stations endpoint handler.

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::respond;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::models::StationRecord;
use crate::state::AppState;

/// Handle GET /api/v1.0/stations requests
pub async fn stations_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationRecord>>> {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/v1.0/stations",
        request_id = %request_id,
        "Processing stations request"
    );

    let result = state.store.stations().await;
    respond("/api/v1.0/stations", &request_id, None, start_time, result)
}
