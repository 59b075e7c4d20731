//! Temperature statistics handlers for `/api/v1.0/{start}` and
//! `/api/v1.0/{start}/{end}`.
//!
//! Both return one record per date with that day's min, average and max
//! observed temperature across all stations. Path dates must be `YYYY-MM-DD`;
//! anything else, or an end before the start, is rejected with 400.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::respond;
use crate::dates::{parse_date, parse_range};
use crate::error::Result;
use crate::logging::{generate_request_id, log_request_error};
use crate::models::TemperatureStats;
use crate::state::AppState;

const START_ENDPOINT: &str = "/api/v1.0/{start}";
const RANGE_ENDPOINT: &str = "/api/v1.0/{start}/{end}";

/// Handle GET /api/v1.0/{start} requests
pub async fn temperature_start_handler(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStats>>> {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let params = format!("start={}", start);

    debug!(
        endpoint = START_ENDPOINT,
        request_id = %request_id,
        start = %start,
        "Processing temperature stats request"
    );

    let start_date = parse_date("start", &start).map_err(|error| {
        log_request_error(&error, START_ENDPOINT, &request_id, Some(&params));
        error
    })?;

    let result = state.store.temperature_stats(start_date, None).await;
    respond(START_ENDPOINT, &request_id, Some(&params), start_time, result)
}

/// Handle GET /api/v1.0/{start}/{end} requests
pub async fn temperature_range_handler(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStats>>> {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let params = format!("start={}, end={}", start, end);

    debug!(
        endpoint = RANGE_ENDPOINT,
        request_id = %request_id,
        start = %start,
        end = %end,
        "Processing temperature stats request"
    );

    let (start_date, end_date) = parse_range(&start, &end).map_err(|error| {
        log_request_error(&error, RANGE_ENDPOINT, &request_id, Some(&params));
        error
    })?;

    let result = state
        .store
        .temperature_stats(start_date, Some(end_date))
        .await;
    respond(RANGE_ENDPOINT, &request_id, Some(&params), start_time, result)
}
