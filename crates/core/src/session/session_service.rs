use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::session_model::{AuthEvent, Credentials, Session, SignUpOutcome, SignUpRequest};
use super::session_traits::SessionProviderTrait;
use crate::constants::MIN_PASSWORD_LENGTH;
use crate::errors::{AuthFailure, Error, Result, ValidationError};

const AUTH_EVENT_CAPACITY: usize = 64;

/// Maps a sign-in rejection message onto a user-facing failure.
pub fn classify_sign_in_error(message: &str) -> AuthFailure {
    if message.contains("Invalid login credentials") {
        AuthFailure::InvalidCredentials
    } else if message.contains("Email not confirmed") {
        AuthFailure::EmailNotConfirmed
    } else {
        AuthFailure::Rejected(message.to_string())
    }
}

/// Maps a sign-up rejection message onto a user-facing failure.
pub fn classify_sign_up_error(message: &str) -> AuthFailure {
    if message.contains("already registered") {
        AuthFailure::AlreadyRegistered
    } else if message.contains("valid email") {
        AuthFailure::InvalidEmail
    } else {
        AuthFailure::Rejected(message.to_string())
    }
}

/// Checks the sign-up form before it reaches the auth service.
pub fn validate_sign_up(request: &SignUpRequest) -> Result<()> {
    if request.email.trim().is_empty() {
        return Err(ValidationError::MissingField("email".to_string()).into());
    }
    if request.password != request.confirm_password {
        return Err(AuthFailure::PasswordMismatch.into());
    }
    if request.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthFailure::PasswordTooShort(MIN_PASSWORD_LENGTH).into());
    }
    Ok(())
}

fn reclassify(err: Error, classify: fn(&str) -> AuthFailure) -> Error {
    match err {
        Error::Auth(AuthFailure::Rejected(message)) => Error::Auth(classify(&message)),
        other => other,
    }
}

/// Session gate and sign-in/sign-up flows.
pub struct AuthService {
    provider: Arc<dyn SessionProviderTrait>,
    events: broadcast::Sender<AuthEvent>,
}

impl AuthService {
    pub fn new(provider: Arc<dyn SessionProviderTrait>) -> Self {
        let (events, _receiver) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Self { provider, events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: AuthEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Gate in front of every protected page: a missing or rejected token
    /// fails with `Unauthenticated`, which callers turn into a login redirect.
    pub async fn require_session(&self, access_token: Option<&str>) -> Result<Session> {
        let token = access_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Unauthenticated("No session".to_string()))?;
        match self.provider.get_session(token).await? {
            Some(session) => Ok(session),
            None => {
                debug!("Rejected access token");
                Err(Error::Unauthenticated("Session expired or invalid".to_string()))
            }
        }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(
                ValidationError::InvalidInput("Please enter email and password".to_string()).into(),
            );
        }
        let session = self
            .provider
            .sign_in(credentials)
            .await
            .map_err(|err| reclassify(err, classify_sign_in_error))?;
        info!("User {} signed in", session.user.id);
        self.publish(AuthEvent::SignedIn {
            user_id: session.user.id.clone(),
        });
        Ok(session)
    }

    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome> {
        validate_sign_up(request)?;
        let outcome = self
            .provider
            .sign_up(request.email.trim(), &request.password)
            .await
            .map_err(|err| reclassify(err, classify_sign_up_error))?;
        if let SignUpOutcome::SignedIn { session } = &outcome {
            self.publish(AuthEvent::SignedIn {
                user_id: session.user.id.clone(),
            });
        }
        Ok(outcome)
    }

    /// Ends the session and notifies listeners so clients navigate to login.
    pub async fn sign_out(&self, session: &Session) -> Result<()> {
        if let Err(err) = self.provider.sign_out(&session.access_token).await {
            warn!("Sign-out request failed for user {}: {}", session.user.id, err);
            return Err(err);
        }
        info!("User {} signed out", session.user.id);
        self.publish(AuthEvent::SignedOut {
            user_id: session.user.id.clone(),
        });
        Ok(())
    }
}
