//! Connection settings for the HTTP registry client.

use std::time::Duration;

/// Default registry root, matching a locally running registry.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Configuration for `HttpRegistryClient`.
#[derive(Debug, Clone)]
pub struct RegistryClientConfig {
    /// Base URL every path is appended to (e.g. `http://localhost:8080/api`).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RegistryClientConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Joins a path such as `/session/1` onto the base URL.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for RegistryClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
