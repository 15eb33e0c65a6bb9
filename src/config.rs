//! Runtime configuration for the HTTP transport.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Clone, Debug)]
pub struct Config {
    /// Backend origin, e.g. `http://localhost:8080`. No trailing slash required.
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Reads `GESCOM_BASE_URL` and `GESCOM_TIMEOUT_MS`, falling back to defaults.
    pub fn from_env() -> Self {
        let base_url = std::env::var("GESCOM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = std::env::var("GESCOM_TIMEOUT_MS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_millis(DEFAULT_TIMEOUT_MS));
        Self { base_url, timeout }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
