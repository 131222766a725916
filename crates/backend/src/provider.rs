use std::sync::Arc;

use log::info;

use agentplay_core::errors::Result;
use agentplay_core::repositories::{Repositories, RepositoryProvider};
use agentplay_core::session::{Session, SessionProviderTrait};

use crate::auth::AuthClient;
use crate::client::RestClient;
use crate::config::BackendConfig;
use crate::repositories::RemoteRepository;

/// The hosted backend: one shared connection pool, one auth client, and a
/// REST client per session.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    config: BackendConfig,
    http: reqwest::Client,
    auth: Arc<AuthClient>,
}

impl RemoteBackend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let http = config.http_client()?;
        let auth = AuthClient::with_http_client(http.clone(), &config)?;
        info!(
            "Using hosted backend at {} (timeout: {})",
            config.url,
            config
                .timeout
                .map(|t| format!("{}ms", t.as_millis()))
                .unwrap_or_else(|| "none".to_string())
        );
        Ok(Self {
            config,
            http,
            auth: Arc::new(auth),
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Repositories scoped to one session's access token.
    pub fn repository_for(&self, session: &Session) -> Result<RemoteRepository> {
        let rest = RestClient::with_http_client(self.http.clone(), &self.config, &session.access_token)?;
        Ok(RemoteRepository::new(rest, &session.user.id))
    }
}

impl RepositoryProvider for RemoteBackend {
    fn sessions(&self) -> Arc<dyn SessionProviderTrait> {
        self.auth.clone()
    }

    fn repositories(&self, session: &Session) -> Result<Repositories> {
        let repository = Arc::new(self.repository_for(session)?);
        Ok(Repositories {
            players: repository.clone(),
            prospects: repository.clone(),
            catalog: repository.clone(),
            deals: repository.clone(),
            contracts: repository.clone(),
            payments: repository.clone(),
            reminders: repository.clone(),
            contacts: repository,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentplay_core::session::SessionUser;
    use std::time::Duration;

    fn session(token: &str) -> Session {
        Session {
            access_token: token.to_string(),
            refresh_token: None,
            expires_at: None,
            user: SessionUser {
                id: "u1".to_string(),
                email: None,
            },
        }
    }

    #[test]
    fn test_repositories_are_scoped_to_the_session() {
        let backend = RemoteBackend::new(
            BackendConfig::new("https://project.example.co", "anon")
                .with_timeout(Some(Duration::from_millis(1500))),
        )
        .unwrap();
        let repository = backend.repository_for(&session("token-1")).unwrap();
        assert_eq!(repository.user_id, "u1");
        assert_eq!(repository.rest.base_url(), "https://project.example.co");
        assert!(backend.repositories(&session("token-1")).is_ok());
    }

    #[test]
    fn test_unprintable_token_is_rejected() {
        let backend = RemoteBackend::new(BackendConfig::new("https://project.example.co", "anon")).unwrap();
        assert!(backend.repositories(&session("bad\ntoken")).is_err());
    }

    #[test]
    fn test_invalid_api_key_fails_at_startup() {
        assert!(RemoteBackend::new(BackendConfig::new("https://project.example.co", "bad\nkey")).is_err());
    }
}
