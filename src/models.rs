//! Static schema declaration and the records served by the API.
//!
//! The service reads two tables it does not own. Their expected shape is
//! declared here and checked once at startup; the record types below are what
//! each route serializes.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use serde::{Deserialize, Serialize};

/// Expected shape of one table in the climate database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name
    pub name: &'static str,
    /// Columns the service reads from it
    pub columns: &'static [&'static str],
}

/// Daily observations, one row per station and date
pub const MEASUREMENT_TABLE: TableSchema = TableSchema {
    name: "measurement",
    columns: &["station", "date", "prcp", "tobs"],
};

/// Observation sites
pub const STATION_TABLE: TableSchema = TableSchema {
    name: "station",
    columns: &["station", "name", "latitude", "longitude", "elevation"],
};

/// Every table the service depends on
pub const SCHEMA: [TableSchema; 2] = [MEASUREMENT_TABLE, STATION_TABLE];

/// A temperature reading as stored.
///
/// SQLite keeps integer and real values apart; the distinction survives into
/// the JSON output so that `82` stays `82` and `82.5` stays `82.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Temperature {
    /// Stored as an INTEGER value
    Integer(i64),
    /// Stored as a REAL value
    Real(f64),
}

impl Temperature {
    /// Numeric value for comparisons
    pub fn as_f64(self) -> f64 {
        match self {
            Temperature::Integer(value) => value as f64,
            Temperature::Real(value) => value,
        }
    }
}

impl FromSql for Temperature {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(i) => Ok(Temperature::Integer(i)),
            ValueRef::Real(f) => Ok(Temperature::Real(f)),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// One `/api/v1.0/precipitation` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Precipitation")]
    pub precipitation: Option<f64>,
}

/// One `/api/v1.0/stations` entry.
///
/// Only the identifier is required; empty metadata cells come out as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    #[serde(rename = "Station")]
    pub station: String,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Lat")]
    pub latitude: Option<f64>,
    #[serde(rename = "Lon")]
    pub longitude: Option<f64>,
    #[serde(rename = "Elevation")]
    pub elevation: Option<f64>,
}

/// One `/api/v1.0/tobs` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TobsRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Tobs")]
    pub tobs: Option<Temperature>,
}

/// Per-date temperature summary returned by the range routes.
///
/// The aggregates are null only when every reading for the date is null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "TMIN")]
    pub min: Option<Temperature>,
    #[serde(rename = "TAVG")]
    pub avg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub max: Option<Temperature>,
}

/// Row counts and date span of the opened database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub measurement_count: u64,
    pub station_count: u64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}
