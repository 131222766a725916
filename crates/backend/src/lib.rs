//! AgentPlay Backend - client for the hosted data and auth APIs.
//!
//! Implements the repository and session traits of `agentplay-core` over a
//! PostgREST-style table API (`/rest/v1`) and a GoTrue-style auth API
//! (`/auth/v1`). Backend errors are mapped onto the core error types.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod query;
pub mod repositories;
pub mod rows;

pub use auth::AuthClient;
pub use client::RestClient;
pub use config::BackendConfig;
pub use provider::RemoteBackend;
pub use query::Query;
pub use repositories::RemoteRepository;
