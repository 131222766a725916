use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A signed-in session issued by the hosted auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SessionUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignUpOutcome {
    SignedIn { session: Session },
    /// The account exists but the email must be confirmed first.
    ConfirmationRequired { email: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    SignedIn { user_id: String },
    SignedOut { user_id: String },
}

impl AuthEvent {
    pub fn user_id(&self) -> &str {
        match self {
            AuthEvent::SignedIn { user_id } | AuthEvent::SignedOut { user_id } => user_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AuthEvent::SignedIn { .. } => "SIGNED_IN",
            AuthEvent::SignedOut { .. } => "SIGNED_OUT",
        }
    }
}
