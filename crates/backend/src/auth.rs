//! Client for the hosted auth API (password sign-in, sign-up, sign-out and
//! token introspection).

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use agentplay_core::errors::{Error, Result};
use agentplay_core::session::{Credentials, Session, SessionProviderTrait, SessionUser, SignUpOutcome};

use crate::config::BackendConfig;
use crate::error::{connection_error, map_auth_error};

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<UserResponse> for SessionUser {
    fn from(user: UserResponse) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: UserResponse,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| Utc::now().timestamp() + secs));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into(),
        }
    }
}

/// Sign-up answers with a session when accounts are confirmed automatically,
/// otherwise with the bare user awaiting email confirmation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(UserResponse),
}

/// Auth API client. Rejections surface as `AuthFailure::Rejected` carrying
/// the API's own message.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
    api_key: HeaderValue,
}

impl AuthClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Self::with_http_client(config.http_client()?, config)
    }

    pub fn with_http_client(client: reqwest::Client, config: &BackendConfig) -> Result<Self> {
        let api_key = HeaderValue::from_str(&config.anon_key)
            .map_err(|e| Error::Unexpected(format!("Invalid API key format: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    fn headers(&self, access_token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static("apikey"), self.api_key.clone());
        if let Some(token) = access_token {
            let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::Unauthenticated(format!("Malformed access token: {}", e)))?;
            headers.insert(AUTHORIZATION, bearer);
        }
        Ok(headers)
    }

    async fn post(
        &self,
        path: &str,
        access_token: Option<&str>,
        body: serde_json::Value,
    ) -> Result<(StatusCode, String)> {
        let url = self.endpoint(path);
        debug!("[Auth] POST {}", url);
        let response = self
            .client
            .post(&url)
            .headers(self.headers(access_token)?)
            .json(&body)
            .send()
            .await
            .map_err(connection_error)?;
        let status = response.status();
        let text = response.text().await.map_err(connection_error)?;
        Ok((status, text))
    }

    fn parse<T: serde::de::DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
        if !status.is_success() {
            return Err(map_auth_error(status, body));
        }
        serde_json::from_str(body)
            .map_err(|e| Error::Unexpected(format!("Failed to parse auth response: {}", e)))
    }
}

#[async_trait]
impl SessionProviderTrait for AuthClient {
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>> {
        let url = self.endpoint("/user");
        debug!("[Auth] GET {}", url);
        let headers = match self.headers(Some(access_token)) {
            Ok(headers) => headers,
            Err(_) => return Ok(None),
        };
        let response = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(connection_error)?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(None);
        }
        let body = response.text().await.map_err(connection_error)?;
        let user: UserResponse = Self::parse(status, &body)?;

        Ok(Some(Session {
            access_token: access_token.to_string(),
            refresh_token: None,
            expires_at: None,
            user: user.into(),
        }))
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        let (status, body) = self
            .post(
                "/token?grant_type=password",
                None,
                json!({ "email": credentials.email, "password": credentials.password }),
            )
            .await?;
        let token: TokenResponse = Self::parse(status, &body)?;
        info!("[Auth] Signed in user {}", token.user.id);
        Ok(token.into_session())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        let (status, body) = self
            .post("/signup", None, json!({ "email": email, "password": password }))
            .await?;
        match Self::parse::<SignUpResponse>(status, &body)? {
            SignUpResponse::Session(token) => Ok(SignUpOutcome::SignedIn {
                session: token.into_session(),
            }),
            SignUpResponse::User(user) => Ok(SignUpOutcome::ConfirmationRequired {
                email: user.email.unwrap_or_else(|| email.to_string()),
            }),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let (status, body) = self.post("/logout", Some(access_token), json!({})).await?;
        // An already invalid token counts as signed out.
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        Err(map_auth_error(status, &body))
    }
}
