use std::time::Duration;

use agentplay_core::errors::{Error, Result};

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyz.example.co`.
    pub url: String,
    /// Public (anonymous) API key sent as the `apikey` header.
    pub anon_key: String,
    /// Per-request timeout. `None` waits for the backend indefinitely.
    pub timeout: Option<Duration>,
}

impl BackendConfig {
    pub fn new(url: &str, anon_key: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the HTTP client shared by every session.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))
    }
}
