//! Blocking HTTP helpers. Every request carries a fixed timeout and is tried
//! exactly once.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub fn http_client() -> Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

fn get(
    client: &reqwest::blocking::Client,
    url: &str,
    timeout: Duration,
) -> Result<reqwest::blocking::Response> {
    debug!("GET {url}");
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .with_context(|| format!("request to {url} failed"))?;
    if !response.status().is_success() {
        bail!("failed to download {}: HTTP {}", url, response.status());
    }
    Ok(response)
}

pub fn fetch_text(client: &reqwest::blocking::Client, url: &str, timeout: Duration) -> Result<String> {
    let text = get(client, url, timeout)?
        .text()
        .with_context(|| format!("failed to read body of {url}"))?;
    Ok(text)
}

/// Fetches and decodes a JSON document.
pub fn fetch_json(client: &reqwest::blocking::Client, url: &str, timeout: Duration) -> Result<Value> {
    let text = fetch_text(client, url, timeout)?;
    serde_json::from_str(&text).with_context(|| format!("failed to decode JSON from {url}"))
}

/// Downloads `url` into `path`, returning the number of bytes written.
pub fn download_to_path(
    client: &reqwest::blocking::Client,
    url: &str,
    path: &Path,
    timeout: Duration,
) -> Result<usize> {
    let bytes = get(client, url, timeout)?
        .bytes()
        .with_context(|| format!("failed to read body of {url}"))?;
    fs::write(path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(bytes.len())
}
