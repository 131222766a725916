//! HTTP client for the hosted REST table API.
//!
//! One client is created per signed-in session: every request carries the
//! project's public key plus the user's access token, so row-level security
//! on the backend scopes all reads and writes to that user.

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use agentplay_core::constants::Table;
use agentplay_core::errors::{Error, Result};

use crate::config::BackendConfig;
use crate::error::{connection_error, map_rest_error};
use crate::query::Query;

/// Accept header asking for a single JSON object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

// ─────────────────────────────────────────────────────────────────────────────
// REST Client
// ─────────────────────────────────────────────────────────────────────────────

/// Table client bound to one user session.
///
/// ```ignore
/// let client = RestClient::new(&config, &session.access_token)?;
/// let players: Vec<PlayerRow> = client.select(Table::Players, &Query::new().select("*")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    api_key: HeaderValue,
    auth_header: HeaderValue,
}

impl RestClient {
    /// Creates a client with its own connection pool.
    pub fn new(config: &BackendConfig, access_token: &str) -> Result<Self> {
        Self::with_http_client(config.http_client()?, config, access_token)
    }

    /// Creates a client on top of an existing connection pool.
    pub fn with_http_client(
        client: reqwest::Client,
        config: &BackendConfig,
        access_token: &str,
    ) -> Result<Self> {
        let api_key = HeaderValue::from_str(&config.anon_key)
            .map_err(|e| Error::Unexpected(format!("Invalid API key format: {}", e)))?;
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|e| Error::Unexpected(format!("Invalid access token format: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key,
            auth_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn table_url(&self, table: Table, query: &Query) -> String {
        let query_string = query.to_query_string();
        if query_string.is_empty() {
            format!("{}/rest/v1/{}", self.base_url, table)
        } else {
            format!("{}/rest/v1/{}?{}", self.base_url, table, query_string)
        }
    }

    fn headers(&self, single: bool, returning: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static("apikey"), self.api_key.clone());
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        if single {
            headers.insert(ACCEPT, HeaderValue::from_static(SINGLE_OBJECT));
        }
        if returning {
            headers.insert(
                HeaderName::from_static("prefer"),
                HeaderValue::from_static(RETURN_REPRESENTATION),
            );
        }
        headers
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        debug!("[Backend] {} {}", method, url);

        let mut request = self.client.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.map_err(connection_error)?;

        self.parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await.map_err(connection_error)?;

        if !status.is_success() {
            return Err(map_rest_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::Repository(format!(
                "Failed to parse backend response: {} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Table operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rows matching the query.
    pub async fn select<T: DeserializeOwned>(&self, table: Table, query: &Query) -> Result<Vec<T>> {
        self.send(Method::GET, self.table_url(table, query), self.headers(false, false), None)
            .await
    }

    /// Exactly one row. Zero matches fail with `DatabaseError::NotFound`.
    pub async fn select_single<T: DeserializeOwned>(&self, table: Table, query: &Query) -> Result<T> {
        self.send(Method::GET, self.table_url(table, query), self.headers(true, false), None)
            .await
    }

    /// Inserts one row and returns it, shaped by the query's `select`.
    pub async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: Table,
        row: &B,
        query: &Query,
    ) -> Result<T> {
        let body = serde_json::to_value(row)?;
        self.send(
            Method::POST,
            self.table_url(table, query),
            self.headers(true, true),
            Some(body),
        )
        .await
    }

    /// Patches the single row selected by the query's filters and returns it.
    pub async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        table: Table,
        query: &Query,
        changes: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(changes)?;
        self.send(
            Method::PATCH,
            self.table_url(table, query),
            self.headers(true, true),
            Some(body),
        )
        .await
    }

    /// Deletes the rows selected by the query's filters. Returns how many went.
    pub async fn delete(&self, table: Table, query: &Query) -> Result<usize> {
        let deleted: Vec<serde_json::Value> = self
            .send(
                Method::DELETE,
                self.table_url(table, query),
                self.headers(false, true),
                None,
            )
            .await?;
        Ok(deleted.len())
    }
}
