//! Fixture databases.
//!
//! The layout follows the reference `hawaii.sqlite` file, including its `id`
//! primary keys, except that `tobs` has INTEGER affinity so whole-degree
//! readings stay integers.

use rusqlite::{params, Connection, Result};
use std::path::Path;

const CREATE_TABLES: &str = "
    CREATE TABLE measurement (
        id INTEGER NOT NULL PRIMARY KEY,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs INTEGER
    );
    CREATE TABLE station (
        id INTEGER NOT NULL PRIMARY KEY,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
";

/// Stations used by [`create_sample_db`]: (id, name, lat, lon, elevation)
pub const STATIONS: [(&str, &str, f64, f64, f64); 3] = [
    ("USC00519397", "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0),
    ("USC00513117", "KANEOHE 838.1, HI US", 21.4234, -157.8015, 14.6),
    ("USC00519281", "WAIHEE 837.5, HI US", 21.45167, -157.84889, 32.9),
];

/// Measurements used by [`create_sample_db`]: (station, date, prcp, tobs)
pub const MEASUREMENTS: [(&str, &str, Option<f64>, i64); 12] = [
    ("USC00519397", "2016-08-22", Some(0.4), 78),
    ("USC00519397", "2016-08-23", Some(0.0), 81),
    ("USC00513117", "2016-08-23", Some(0.15), 76),
    ("USC00519281", "2016-08-23", Some(1.79), 77),
    ("USC00519397", "2017-01-01", None, 62),
    ("USC00513117", "2017-01-01", Some(0.29), 66),
    ("USC00519397", "2017-08-21", Some(0.0), 81),
    ("USC00519281", "2017-08-21", Some(0.56), 76),
    ("USC00519397", "2017-08-22", Some(0.0), 82),
    ("USC00519281", "2017-08-22", Some(0.5), 76),
    ("USC00519397", "2017-08-23", Some(0.0), 81),
    ("USC00513117", "2017-08-23", Some(0.0), 82),
];

/// Create a database with both tables and no rows
pub fn create_empty_db(path: &Path) -> Result<()> {
    let conn = Connection::open(path)?;
    conn.execute_batch(CREATE_TABLES)?;
    Ok(())
}

/// Create a database holding the given measurements and no stations
pub fn create_db_with_measurements(path: &Path, rows: &[(&str, &str, Option<f64>, i64)]) -> Result<()> {
    let conn = Connection::open(path)?;
    conn.execute_batch(CREATE_TABLES)?;
    insert_measurements(&conn, rows)?;
    Ok(())
}

/// Create a small Hawaii-like database: three stations, a year of readings
pub fn create_sample_db(path: &Path) -> Result<()> {
    let conn = Connection::open(path)?;
    conn.execute_batch(CREATE_TABLES)?;

    for (station, name, lat, lon, elevation) in STATIONS {
        conn.execute(
            "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![station, name, lat, lon, elevation],
        )?;
    }
    insert_measurements(&conn, &MEASUREMENTS)?;

    Ok(())
}

fn insert_measurements(conn: &Connection, rows: &[(&str, &str, Option<f64>, i64)]) -> Result<()> {
    for (station, date, prcp, tobs) in rows {
        conn.execute(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
            params![station, date, prcp, tobs],
        )?;
    }
    Ok(())
}
