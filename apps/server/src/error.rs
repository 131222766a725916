use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use agentplay_core::errors::{AuthFailure, DatabaseError, Error as CoreError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        CoreError::Auth(AuthFailure::InvalidCredentials | AuthFailure::EmailNotConfirmed) => {
            StatusCode::UNAUTHORIZED
        }
        CoreError::Auth(AuthFailure::AlreadyRegistered) => StatusCode::CONFLICT,
        CoreError::Auth(_) => StatusCode::BAD_REQUEST,
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::ConstraintViolation(_) => StatusCode::CONFLICT,
        CoreError::Database(db) => match db {
            DatabaseError::NotFound(_) => StatusCode::NOT_FOUND,
            DatabaseError::UniqueViolation(_) | DatabaseError::ForeignKeyViolation(_) => {
                StatusCode::CONFLICT
            }
            DatabaseError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            DatabaseError::ConnectionFailed(_) => StatusCode::BAD_GATEWAY,
            DatabaseError::QueryFailed(_) => StatusCode::BAD_REQUEST,
            DatabaseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
        CoreError::Repository(_) | CoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => {
                let status = core_status(e);
                if status.is_server_error() {
                    tracing::error!("Request failed: {}", e);
                }
                (status, e.to_string())
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason.clone()),
            ApiError::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason.clone()),
            ApiError::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use agentplay_core::errors::ValidationError;

    fn status_of(err: CoreError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_core_errors_map_to_statuses() {
        assert_eq!(
            status_of(CoreError::Unauthenticated("No session".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AuthFailure::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AuthFailure::AlreadyRegistered.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AuthFailure::PasswordMismatch.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ValidationError::MissingField("title".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DatabaseError::NotFound("Player p1".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DatabaseError::UniqueViolation("dup".into()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DatabaseError::PermissionDenied("rls".into()).into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(DatabaseError::ConnectionFailed("refused".into()).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(CoreError::Unexpected("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
