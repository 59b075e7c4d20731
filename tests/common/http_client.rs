//! Plain GETs against a served fixture.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::net::SocketAddr;
use std::time::Duration;

/// GET `path` from the server at `addr`, whatever the status
pub async fn get(addr: &SocketAddr, path: &str) -> reqwest::Result<Response> {
    // A fresh client per call; each test runs on its own runtime
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?
        .get(format!("http://{addr}{path}"))
        .send()
        .await
}

/// GET `path` and decode the JSON body, failing on any non-2xx status
pub async fn get_json<T: DeserializeOwned>(addr: &SocketAddr, path: &str) -> reqwest::Result<T> {
    get(addr, path).await?.error_for_status()?.json().await
}
