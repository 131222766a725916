use std::sync::Arc;

use anyhow::Context;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use agentplay_backend::{BackendConfig, RemoteBackend};
use agentplay_core::{
    memory::MemoryBackend, session::AuthService, utils::time_utils::Clock, PageContext,
    RepositoryProvider,
};

use crate::config::{BackendKind, Config, LogFormat};

/// Board state of each signed-in user, keyed by user id.
///
/// One lock per user serializes that user's pipeline writes and their
/// re-fetches; different users never contend.
#[derive(Default)]
pub struct PageStore {
    pages: DashMap<String, Arc<Mutex<PageContext>>>,
}

impl PageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_user(&self, user_id: &str) -> Arc<Mutex<PageContext>> {
        self.pages
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(PageContext::new(user_id))))
            .clone()
    }

    /// Drops a user's page state, e.g. on sign-out.
    pub fn discard(&self, user_id: &str) {
        self.pages.remove(user_id);
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

pub struct AppState {
    pub provider: Arc<dyn RepositoryProvider>,
    pub auth: AuthService,
    pub pages: PageStore,
    pub clock: Clock,
    pub public_url: String,
}

impl AppState {
    pub fn new(provider: Arc<dyn RepositoryProvider>, clock: Clock, public_url: &str) -> Arc<Self> {
        let auth = AuthService::new(provider.sessions());
        Arc::new(Self {
            provider,
            auth,
            pages: PageStore::new(),
            clock,
            public_url: public_url.trim_end_matches('/').to_string(),
        })
    }
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider: Arc<dyn RepositoryProvider> = match config.backend {
        BackendKind::Remote => {
            let url = config
                .backend_url
                .as_deref()
                .context("AGENTPLAY_BACKEND_URL is required for the remote backend")?;
            let anon_key = config
                .backend_anon_key
                .as_deref()
                .context("AGENTPLAY_BACKEND_ANON_KEY is required for the remote backend")?;
            let backend_config =
                BackendConfig::new(url, anon_key).with_timeout(config.backend_timeout);
            Arc::new(RemoteBackend::new(backend_config)?)
        }
        BackendKind::Memory => {
            tracing::warn!("Using the in-memory backend; data is lost on restart");
            Arc::new(MemoryBackend::new().with_auto_confirm())
        }
    };
    Ok(AppState::new(provider, Clock::System, &config.public_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_page_store_keeps_one_context_per_user() {
        let pages = PageStore::new();
        let first = pages.for_user("u1");
        first.lock().await.players.clear();
        let again = pages.for_user("u1");
        assert!(Arc::ptr_eq(&first, &again));

        let other = pages.for_user("u2");
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(other.lock().await.user_id.as_deref(), Some("u2"));
        assert_eq!(pages.len(), 2);

        pages.discard("u1");
        assert_eq!(pages.len(), 1);
    }
}
