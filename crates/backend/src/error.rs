//! Mapping of backend error responses onto core error types.

use reqwest::StatusCode;
use serde::Deserialize;

use agentplay_core::errors::{AuthFailure, DatabaseError, Error};

/// Code the REST API uses when an object request matched no rows.
pub const NO_ROWS_CODE: &str = "PGRST116";
pub const UNIQUE_VIOLATION_CODE: &str = "23505";
pub const FOREIGN_KEY_VIOLATION_CODE: &str = "23503";
pub const INSUFFICIENT_PRIVILEGE_CODE: &str = "42501";

/// Structured error body returned by the REST API.
#[derive(Debug, Default, Deserialize)]
pub struct RestErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl RestErrorBody {
    fn describe(&self, status: StatusCode) -> String {
        let mut text = self
            .message
            .clone()
            .unwrap_or_else(|| format!("HTTP {}", status));
        if let Some(details) = self.details.as_deref().filter(|d| !d.is_empty()) {
            text.push_str(" (");
            text.push_str(details);
            text.push(')');
        }
        text
    }
}

/// Converts a failed REST response into a core error.
pub fn map_rest_error(status: StatusCode, body: &str) -> Error {
    let Ok(parsed) = serde_json::from_str::<RestErrorBody>(body) else {
        let snippet: String = body.chars().take(200).collect();
        if status == StatusCode::UNAUTHORIZED {
            return Error::Unauthenticated(format!("Backend rejected the session: {}", snippet));
        }
        return DatabaseError::QueryFailed(format!("HTTP {}: {}", status, snippet)).into();
    };

    let message = parsed.describe(status);
    if status == StatusCode::UNAUTHORIZED {
        return Error::Unauthenticated(message);
    }

    match parsed.code.as_deref() {
        Some(NO_ROWS_CODE) => DatabaseError::NotFound(message).into(),
        Some(UNIQUE_VIOLATION_CODE) => DatabaseError::UniqueViolation(message).into(),
        Some(FOREIGN_KEY_VIOLATION_CODE) => DatabaseError::ForeignKeyViolation(message).into(),
        Some(INSUFFICIENT_PRIVILEGE_CODE) => DatabaseError::PermissionDenied(message).into(),
        _ if status == StatusCode::FORBIDDEN => DatabaseError::PermissionDenied(message).into(),
        _ if status.is_server_error() => DatabaseError::Internal(message).into(),
        _ => DatabaseError::QueryFailed(message).into(),
    }
}

pub fn connection_error(err: reqwest::Error) -> Error {
    DatabaseError::ConnectionFailed(err.to_string()).into()
}

/// Error body of the auth API. Different endpoints use different keys.
#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// The auth API's own message, used for classification downstream.
pub fn auth_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<AuthErrorBody>(body)
        .ok()
        .and_then(|err| {
            err.msg
                .or(err.error_description)
                .or(err.message)
                .or(err.error)
        })
        .unwrap_or_else(|| format!("HTTP {}", status))
}

pub fn map_auth_error(status: StatusCode, body: &str) -> Error {
    AuthFailure::Rejected(auth_error_message(status, body)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rows_maps_to_not_found() {
        let body = r#"{"code":"PGRST116","message":"JSON object requested, multiple (or no) rows returned","details":"The result contains 0 rows","hint":null}"#;
        let err = map_rest_error(StatusCode::NOT_ACCEPTABLE, body);
        assert!(err.is_not_found());
        assert!(err.to_string().contains("The result contains 0 rows"));
    }

    #[test]
    fn test_constraint_codes() {
        let unique = map_rest_error(
            StatusCode::CONFLICT,
            r#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#,
        );
        assert!(matches!(unique, Error::Database(DatabaseError::UniqueViolation(_))));

        let fk = map_rest_error(
            StatusCode::CONFLICT,
            r#"{"code":"23503","message":"violates foreign key constraint"}"#,
        );
        assert!(matches!(fk, Error::Database(DatabaseError::ForeignKeyViolation(_))));

        let rls = map_rest_error(
            StatusCode::FORBIDDEN,
            r#"{"code":"42501","message":"new row violates row-level security policy"}"#,
        );
        assert!(matches!(rls, Error::Database(DatabaseError::PermissionDenied(_))));
    }

    #[test]
    fn test_unauthorized_maps_to_unauthenticated() {
        let err = map_rest_error(
            StatusCode::UNAUTHORIZED,
            r#"{"code":"PGRST301","message":"JWT expired"}"#,
        );
        assert!(matches!(err, Error::Unauthenticated(ref m) if m == "JWT expired"));

        let plain = map_rest_error(StatusCode::UNAUTHORIZED, "nope");
        assert!(matches!(plain, Error::Unauthenticated(_)));
    }

    #[test]
    fn test_unstructured_bodies() {
        let err = map_rest_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(matches!(err, Error::Database(DatabaseError::QueryFailed(ref m)) if m.starts_with("HTTP 502")));

        let err = map_rest_error(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"boom"}"#);
        assert!(matches!(err, Error::Database(DatabaseError::Internal(_))));
    }

    #[test]
    fn test_auth_error_message_keys() {
        assert_eq!(
            auth_error_message(
                StatusCode::BAD_REQUEST,
                r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#
            ),
            "Invalid login credentials"
        );
        assert_eq!(
            auth_error_message(StatusCode::BAD_REQUEST, r#"{"code":400,"msg":"Email not confirmed"}"#),
            "Email not confirmed"
        );
        assert_eq!(
            auth_error_message(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"User already registered"}"#),
            "User already registered"
        );
        assert_eq!(auth_error_message(StatusCode::BAD_GATEWAY, ""), "HTTP 502 Bad Gateway");
    }
}
