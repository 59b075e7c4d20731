//! # surfsup
//!
//! A read-only JSON API over the Hawaii climate observation database.
//!
//! The database holds two tables, `measurement` (daily precipitation and
//! temperature per station) and `station` (site metadata). This crate serves
//! them through a handful of fixed GET routes.
//!
//! ## Architecture
//!
//! - **Store**: opens a read-only SQLite connection per query and checks the
//!   expected schema at startup
//! - **API Layer**: axum handlers, one per route, returning JSON arrays
//! - **State**: configuration and store handle built once and shared via `Arc`

pub mod config;
pub mod dates;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod router;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{Result, SurfsUpError};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_error, log_request_error,
    log_store_stats, log_timed_operation,
};
pub use models::{
    DatasetSummary, PrecipitationRecord, StationRecord, Temperature, TemperatureStats, TobsRecord,
};
pub use router::build_router;
pub use state::AppState;
pub use store::ClimateStore;
