//! Welcome page listing the available routes.

use axum::response::Html;
use tracing::debug;

/// Routes advertised on the welcome page, as (label, path) pairs
pub const ROUTES: [(&str, &str); 5] = [
    ("Precipitation", "/api/v1.0/precipitation"),
    ("Stations", "/api/v1.0/stations"),
    ("Temperature Observations", "/api/v1.0/tobs"),
    ("Temperature stats from the start date", "/api/v1.0/yyyy-mm-dd"),
    (
        "Temperature stats from start to end dates",
        "/api/v1.0/yyyy-mm-dd/yyyy-mm-dd",
    ),
];

/// Handle GET / requests
pub async fn welcome_handler() -> Html<String> {
    debug!(endpoint = "/", "Serving welcome page");
    Html(welcome_page())
}

fn welcome_page() -> String {
    let mut page =
        String::from("Welcome to the Hawaii Climate Page! Surfs Up!<br/>Available Routes:<br/>");
    for (label, path) in ROUTES {
        page.push_str(&format!("{}: {}<br/>", label, path));
    }
    page
}
