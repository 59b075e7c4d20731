//! Temperature observation endpoint handler.
//!
//! Returns the observations of the last year of data: everything dated on or
//! after the most recent date minus one calendar year.

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::respond;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::models::TobsRecord;
use crate::state::AppState;

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TobsRecord>>> {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/v1.0/tobs",
        request_id = %request_id,
        "Processing temperature observation request"
    );

    let result = state.store.tobs_last_year().await;
    respond("/api/v1.0/tobs", &request_id, None, start_time, result)
}
