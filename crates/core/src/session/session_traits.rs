use async_trait::async_trait;

use super::session_model::{Credentials, Session, SignUpOutcome};
use crate::errors::Result;

/// Contract with the hosted auth service.
///
/// Rejections carry the service's raw message as `AuthFailure::Rejected`;
/// classification into user-facing failures happens in `AuthService`.
#[async_trait]
pub trait SessionProviderTrait: Send + Sync {
    /// The session behind an access token, or `None` when it is not valid.
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>>;

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome>;

    async fn sign_out(&self, access_token: &str) -> Result<()>;
}
