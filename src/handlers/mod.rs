//! HTTP request handlers for the surfsup API.
//!
//! This module contains all the endpoint handlers for the web server.

pub mod heartbeat;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;
pub mod welcome;

pub use heartbeat::heartbeat_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use temperature::{temperature_range_handler, temperature_start_handler};
pub use tobs::tobs_handler;
pub use welcome::welcome_handler;

use axum::Json;
use std::time::Instant;
use tracing::info;

use crate::error::Result;
use crate::logging::log_request_error;

/// Log the outcome of a list query and turn it into the handler's response
pub(crate) fn respond<T>(
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
    start_time: Instant,
    result: Result<Vec<T>>,
) -> Result<Json<Vec<T>>> {
    match result {
        Ok(rows) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                row_count = rows.len(),
                "Request successful"
            );
            Ok(Json(rows))
        }
        Err(error) => {
            log_request_error(&error, endpoint, request_id, params);
            Err(error)
        }
    }
}
