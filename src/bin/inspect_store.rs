//! Print what a climate database holds: row counts, date span and stations.
//!
//! Usage: `inspect_store [PATH]` (defaults to `Resources/hawaii.sqlite`).

use anyhow::{Context, Result};
use std::path::PathBuf;

use surfsup::config::DatabaseConfig;
use surfsup::store::{query_stations, query_summary, ClimateStore};

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| DatabaseConfig::default().path);

    println!("Inspecting climate database: {}", path.display());

    let config = DatabaseConfig {
        path,
        ..DatabaseConfig::default()
    };
    let store = ClimateStore::open(&config).context("database failed to open or verify")?;
    let conn = store.connect()?;

    let summary = query_summary(&conn)?;
    println!("\n=== MEASUREMENTS ===");
    println!("  rows:       {}", summary.measurement_count);
    println!(
        "  first date: {}",
        summary.first_date.as_deref().unwrap_or("-")
    );
    println!(
        "  last date:  {}",
        summary.last_date.as_deref().unwrap_or("-")
    );

    println!("\n=== STATIONS ({}) ===", summary.station_count);
    for station in query_stations(&conn)? {
        let number = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
        println!(
            "  {:<12} {:<40} lat={:>9} lon={:>10} elev={:>6}",
            station.station,
            station.name.as_deref().unwrap_or("-"),
            number(station.latitude),
            number(station.longitude),
            number(station.elevation)
        );
    }

    Ok(())
}
