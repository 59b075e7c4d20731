//! Precipitation endpoint handler.
//!
//! Returns every (date, precipitation) pair in the database, oldest first.

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::respond;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::models::PrecipitationRecord;
use crate::state::AppState;

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationRecord>>> {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/v1.0/precipitation",
        request_id = %request_id,
        "Processing precipitation request"
    );

    let result = state.store.precipitation().await;
    respond(
        "/api/v1.0/precipitation",
        &request_id,
        None,
        start_time,
        result,
    )
}
