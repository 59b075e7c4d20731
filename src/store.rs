//! Read-only access to the Hawaii climate SQLite database.
//!
//! The store never holds a connection between requests. Every query opens a
//! fresh read-only connection on a blocking worker thread, runs one statement
//! and drops the connection before the result is handed back, whatever the
//! outcome.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::dates::{format_date, one_year_before, parse_stored_date};
use crate::error::{Result, SurfsUpError};
use crate::logging::log_timed_operation;
use crate::models::{
    DatasetSummary, PrecipitationRecord, StationRecord, TableSchema, TemperatureStats, TobsRecord,
    SCHEMA,
};

/// Handle to the climate database.
///
/// Cloning is cheap: the handle is only a path and connection settings.
#[derive(Debug, Clone)]
pub struct ClimateStore {
    path: PathBuf,
    busy_timeout: Duration,
}

impl ClimateStore {
    /// Open the database, check it has the expected tables and return a handle.
    ///
    /// A missing file or a schema mismatch is an error; the service cannot
    /// answer any route without both tables.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let path = config.path.clone();
        if !path.exists() {
            return Err(SurfsUpError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", path.display()),
            )));
        }

        let store = Self {
            path,
            busy_timeout: config.busy_timeout(),
        };

        let conn = store.connect()?;
        log_timed_operation("schema_verification", || verify_schema(&conn))?;
        info!("Opened climate database: {}", store.path.display());

        Ok(store)
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a new read-only connection
    pub fn connect(&self) -> Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_NO_MUTEX
            | OpenFlags::SQLITE_OPEN_URI;
        let conn = Connection::open_with_flags(&self.path, flags)?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    /// Run `query` against a fresh connection on the blocking pool.
    ///
    /// The connection lives only inside the worker closure.
    pub async fn with_connection<F, T>(&self, query: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            let conn = store.connect()?;
            query(&conn)
        })
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Query worker failed: {}", e),
        })?
    }

    /// All (date, precipitation) pairs in date order
    pub async fn precipitation(&self) -> Result<Vec<PrecipitationRecord>> {
        self.with_connection(query_precipitation).await
    }

    /// Every station
    pub async fn stations(&self) -> Result<Vec<StationRecord>> {
        self.with_connection(query_stations).await
    }

    /// Temperature observations from the last year of data
    pub async fn tobs_last_year(&self) -> Result<Vec<TobsRecord>> {
        self.with_connection(query_tobs_last_year).await
    }

    /// Per-date min/avg/max temperature from `start`, up to `end` when given
    pub async fn temperature_stats(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Vec<TemperatureStats>> {
        self.with_connection(move |conn| query_temperature_stats(conn, start, end))
            .await
    }

    /// Row counts and date span
    pub async fn summary(&self) -> Result<DatasetSummary> {
        self.with_connection(query_summary).await
    }
}

/// Check that every declared table exists with the declared columns.
///
/// Extra columns are allowed.
pub fn verify_schema(conn: &Connection) -> Result<()> {
    for table in SCHEMA.iter() {
        verify_table(conn, table)?;
    }
    Ok(())
}

fn verify_table(conn: &Connection, table: &TableSchema) -> Result<()> {
    // Table names come from the static schema, never from input
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table.name))?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<String>>>()?;

    if present.is_empty() {
        return Err(SurfsUpError::Schema {
            message: format!("Table '{}' not found", table.name),
        });
    }

    let missing: Vec<&str> = table
        .columns
        .iter()
        .copied()
        .filter(|column| !present.iter().any(|p| p.eq_ignore_ascii_case(column)))
        .collect();

    if !missing.is_empty() {
        return Err(SurfsUpError::Schema {
            message: format!(
                "Table '{}' is missing columns: {}",
                table.name,
                missing.join(", ")
            ),
        });
    }

    debug!(table = table.name, columns = present.len(), "Table verified");
    Ok(())
}

/// `SELECT date, prcp` ordered by date
pub fn query_precipitation(conn: &Connection) -> Result<Vec<PrecipitationRecord>> {
    let mut stmt =
        conn.prepare("SELECT date, prcp FROM measurement ORDER BY date ASC, station ASC")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(PrecipitationRecord {
                date: row.get(0)?,
                precipitation: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(row_count = rows.len(), "Precipitation query finished");
    Ok(rows)
}

pub fn query_stations(conn: &Connection) -> Result<Vec<StationRecord>> {
    let mut stmt = conn.prepare(
        "SELECT station, name, latitude, longitude, elevation FROM station ORDER BY station ASC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(StationRecord {
                station: row.get(0)?,
                name: row.get(1)?,
                latitude: row.get(2)?,
                longitude: row.get(3)?,
                elevation: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(row_count = rows.len(), "Station query finished");
    Ok(rows)
}

/// Most recent measurement date, if any
pub fn query_latest_date(conn: &Connection) -> Result<Option<NaiveDate>> {
    let latest: Option<String> = conn
        .query_row("SELECT MAX(date) FROM measurement", [], |row| {
            row.get::<_, Option<String>>(0)
        })
        .optional()?
        .flatten();

    latest.as_deref().map(parse_stored_date).transpose()
}

/// Observations dated on or after one year before the latest date
pub fn query_tobs_last_year(conn: &Connection) -> Result<Vec<TobsRecord>> {
    let latest = query_latest_date(conn)?.ok_or_else(|| SurfsUpError::DataNotFound {
        message: "No measurements available to anchor the last year".to_string(),
    })?;
    let anchor = format_date(one_year_before(latest)?);

    let mut stmt = conn.prepare(
        "SELECT date, tobs FROM measurement WHERE date >= ?1 ORDER BY date ASC, station ASC",
    )?;
    let rows = stmt
        .query_map(params![anchor], |row| {
            Ok(TobsRecord {
                date: row.get(0)?,
                tobs: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(
        anchor = %anchor,
        latest = %latest,
        row_count = rows.len(),
        "Temperature observation query finished"
    );
    Ok(rows)
}

/// Min/avg/max of tobs grouped by date, over `[start, end]` or `[start, ..)`
pub fn query_temperature_stats(
    conn: &Connection,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Result<Vec<TemperatureStats>> {
    let start = format_date(start);
    let rows = match end {
        Some(end) => {
            let end = format_date(end);
            let mut stmt = conn.prepare(
                "SELECT date, MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement \
                 WHERE date >= ?1 AND date <= ?2 GROUP BY date ORDER BY date ASC",
            )?;
            let rows = stmt
                .query_map(params![start, end], map_stats_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT date, MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement \
                 WHERE date >= ?1 GROUP BY date ORDER BY date ASC",
            )?;
            let rows = stmt
                .query_map(params![start], map_stats_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        }
    };

    debug!(row_count = rows.len(), "Temperature stats query finished");
    Ok(rows)
}

fn map_stats_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TemperatureStats> {
    Ok(TemperatureStats {
        date: row.get(0)?,
        min: row.get(1)?,
        avg: row.get(2)?,
        max: row.get(3)?,
    })
}

pub fn query_summary(conn: &Connection) -> Result<DatasetSummary> {
    let (measurement_count, first_date, last_date): (i64, Option<String>, Option<String>) = conn
        .query_row(
            "SELECT COUNT(*), MIN(date), MAX(date) FROM measurement",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
    let station_count: i64 =
        conn.query_row("SELECT COUNT(*) FROM station", [], |row| row.get(0))?;

    Ok(DatasetSummary {
        measurement_count: u64::try_from(measurement_count).unwrap_or_default(),
        station_count: u64::try_from(station_count).unwrap_or_default(),
        first_date,
        last_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Temperature;
    use pretty_assertions::assert_eq;

    const CREATE_TABLES: &str = "
        CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs INTEGER
        );
        CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        );
    ";

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(CREATE_TABLES).unwrap();
        conn
    }

    fn insert_measurement(
        conn: &Connection,
        station: &str,
        date: &str,
        prcp: Option<f64>,
        tobs: i64,
    ) {
        conn.execute(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
            params![station, date, prcp, tobs],
        )
        .unwrap();
    }

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_verify_schema_accepts_reference_layout() {
        let conn = memory_db();
        assert!(verify_schema(&conn).is_ok());
    }

    #[test]
    fn test_verify_schema_rejects_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE measurement (station TEXT, date TEXT, prcp FLOAT, tobs INTEGER);",
        )
        .unwrap();

        let err = verify_schema(&conn).unwrap_err();
        assert!(err.to_string().contains("'station' not found"), "{err}");
    }

    #[test]
    fn test_verify_schema_rejects_missing_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE measurement (station TEXT, date TEXT, prcp FLOAT);
             CREATE TABLE station (station TEXT, name TEXT, latitude FLOAT, longitude FLOAT, elevation FLOAT);",
        )
        .unwrap();

        let err = verify_schema(&conn).unwrap_err();
        assert!(matches!(err, SurfsUpError::Schema { .. }));
        assert!(err.to_string().contains("tobs"), "{err}");
    }

    #[test]
    fn test_precipitation_is_date_ordered() {
        let conn = memory_db();
        insert_measurement(&conn, "A", "2017-01-03", Some(0.5), 70);
        insert_measurement(&conn, "A", "2017-01-01", None, 68);
        insert_measurement(&conn, "B", "2017-01-02", Some(0.0), 71);

        let rows = query_precipitation(&conn).unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2017-01-01", "2017-01-02", "2017-01-03"]);
        assert_eq!(rows[0].precipitation, None);
        assert_eq!(rows[2].precipitation, Some(0.5));
    }

    #[test]
    fn test_tobs_window_is_one_year_inclusive() {
        let conn = memory_db();
        insert_measurement(&conn, "A", "2016-08-22", None, 60);
        insert_measurement(&conn, "A", "2016-08-23", None, 61);
        insert_measurement(&conn, "A", "2017-03-01", None, 70);
        insert_measurement(&conn, "A", "2017-08-23", None, 80);

        let rows = query_tobs_last_year(&conn).unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2016-08-23", "2017-03-01", "2017-08-23"]);
        assert_eq!(rows[2].tobs, Some(Temperature::Integer(80)));
    }

    #[test]
    fn test_tobs_window_from_leap_day() {
        let conn = memory_db();
        insert_measurement(&conn, "A", "2015-02-27", None, 60);
        insert_measurement(&conn, "A", "2015-02-28", None, 61);
        insert_measurement(&conn, "A", "2016-02-29", None, 62);

        let rows = query_tobs_last_year(&conn).unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2015-02-28", "2016-02-29"]);
    }

    #[test]
    fn test_tobs_on_empty_store_is_not_found() {
        let conn = memory_db();
        assert!(matches!(
            query_tobs_last_year(&conn),
            Err(SurfsUpError::DataNotFound { .. })
        ));
        assert_eq!(query_latest_date(&conn).unwrap(), None);
    }

    #[test]
    fn test_temperature_stats_grouped_by_date() {
        let conn = memory_db();
        insert_measurement(&conn, "A", "2017-08-22", None, 77);
        insert_measurement(&conn, "A", "2017-08-23", None, 82);
        insert_measurement(&conn, "B", "2017-08-23", None, 76);
        insert_measurement(&conn, "A", "2017-08-24", None, 79);

        let rows = query_temperature_stats(&conn, date("2017-08-23"), None).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2017-08-23");
        assert_eq!(rows[0].min, Some(Temperature::Integer(76)));
        assert_eq!(rows[0].avg, Some(79.0));
        assert_eq!(rows[0].max, Some(Temperature::Integer(82)));

        let rows =
            query_temperature_stats(&conn, date("2017-08-22"), Some(date("2017-08-23"))).unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2017-08-22", "2017-08-23"]);
    }

    #[test]
    fn test_stations_with_missing_metadata() {
        let conn = memory_db();
        conn.execute_batch(
            "INSERT INTO station (station, name, latitude, longitude, elevation)
                 VALUES ('USC00519397', 'WAIKIKI 717.2, HI US', 21.2716, -157.8168, 3.0);
             INSERT INTO station (station, name, latitude, longitude, elevation)
                 VALUES ('USC00511918', NULL, 21.3152, -157.9992, NULL);",
        )
        .unwrap();

        let rows = query_stations(&conn).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].station, "USC00511918");
        assert_eq!(rows[0].name, None);
        assert_eq!(rows[0].latitude, Some(21.3152));
        assert_eq!(rows[0].elevation, None);
        assert_eq!(rows[1].name.as_deref(), Some("WAIKIKI 717.2, HI US"));
    }

    #[test]
    fn test_summary() {
        let conn = memory_db();
        insert_measurement(&conn, "A", "2010-01-01", None, 65);
        insert_measurement(&conn, "A", "2017-08-23", None, 81);
        conn.execute(
            "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES ('A', 'Alpha', 21.0, -157.0, 3.0)",
            [],
        )
        .unwrap();

        let summary = query_summary(&conn).unwrap();
        assert_eq!(
            summary,
            DatasetSummary {
                measurement_count: 2,
                station_count: 1,
                first_date: Some("2010-01-01".to_string()),
                last_date: Some("2017-08-23".to_string()),
            }
        );
    }

    #[test]
    fn test_open_missing_file() {
        let config = DatabaseConfig {
            path: PathBuf::from("/no/such/hawaii.sqlite"),
            busy_timeout_ms: 100,
        };
        assert!(matches!(
            ClimateStore::open(&config),
            Err(SurfsUpError::Io(_))
        ));
    }
}
