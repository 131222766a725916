//! Core error types for the AgentPlay platform.
//!
//! This module defines backend-agnostic error types. Errors coming from the
//! hosted data backend (REST failures, auth rejections) are converted to these
//! types by the backend client crate.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the agency application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No usable session. Callers redirect to the login page.
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Auth(#[from] AuthFailure),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// True when the backend reported that no row matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::NotFound(_)))
    }
}

/// Backend-agnostic error type for data operations.
///
/// The backend client maps its structured error codes onto these variants;
/// the "no rows" code in particular becomes [`DatabaseError::NotFound`].
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The backend could not be reached.
    #[error("Failed to connect to backend: {0}")]
    ConnectionFailed(String),

    /// A query or write was rejected by the backend.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Row-level security refused the operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

/// Classified sign-in and sign-up failures, carrying the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Please confirm your email address before signing in")]
    EmailNotConfirmed,

    #[error("This email address is already registered")]
    AlreadyRegistered,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    /// Unclassified rejection; the backend's message is passed through.
    #[error("{0}")]
    Rejected(String),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Repository(format!("Malformed backend payload: {}", err))
    }
}

impl From<Error> for String {
    fn from(error: Error) -> Self {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detected_only_for_missing_rows() {
        assert!(Error::Database(DatabaseError::NotFound("contracts".into())).is_not_found());
        assert!(!Error::Database(DatabaseError::QueryFailed("boom".into())).is_not_found());
        assert!(!Error::Unexpected("x".into()).is_not_found());
    }

    #[test]
    fn auth_failures_render_user_messages() {
        assert_eq!(
            AuthFailure::PasswordTooShort(6).to_string(),
            "Password must be at least 6 characters long"
        );
        let err: Error = AuthFailure::InvalidCredentials.into();
        assert_eq!(err.to_string(), "Invalid email or password");
    }
}
