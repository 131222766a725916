use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;

/// Which data and auth backend the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// The hosted REST and auth APIs.
    Remote,
    /// In-process storage, for local development.
    Memory,
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(BackendKind::Remote),
            "memory" => Ok(BackendKind::Memory),
            other => anyhow::bail!("Unknown backend '{}', expected 'remote' or 'memory'", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub backend: BackendKind,
    pub backend_url: Option<String>,
    pub backend_anon_key: Option<String>,
    /// Unset means requests to the backend never time out.
    pub backend_timeout: Option<Duration>,
    /// Base URL used in calendar subscription links.
    pub public_url: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, applying defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let listen_addr: SocketAddr = var("AGENTPLAY_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid AGENTPLAY_LISTEN_ADDR")?;
        let backend_url = var("AGENTPLAY_BACKEND_URL");
        let backend_anon_key = var("AGENTPLAY_BACKEND_ANON_KEY");
        let backend = match var("AGENTPLAY_BACKEND") {
            Some(value) => value.parse()?,
            None if backend_url.is_some() => BackendKind::Remote,
            None => BackendKind::Memory,
        };
        let backend_timeout = var("AGENTPLAY_BACKEND_TIMEOUT_MS")
            .map(|value| value.trim().parse::<u64>())
            .transpose()
            .context("Invalid AGENTPLAY_BACKEND_TIMEOUT_MS")?
            .map(Duration::from_millis);
        let public_url = var("AGENTPLAY_PUBLIC_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", listen_addr.port()));
        let cors_allow = var("AGENTPLAY_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("AGENTPLAY_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| "30000".into())
            .parse()
            .unwrap_or(30000);
        let static_dir = var("AGENTPLAY_STATIC_DIR").unwrap_or_else(|| "dist".into());
        let log_format = match var("AGENTPLAY_LOG_FORMAT") {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            backend,
            backend_url,
            backend_anon_key,
            backend_timeout,
            public_url,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            log_format,
        })
    }
}
