use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{
        sse::{Event as SseEvent, KeepAlive, Sse},
        Response,
    },
    routing::{get, post},
    Extension, Json, Router,
};
use futures::Stream;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};

use agentplay_core::{
    session::{Credentials, Session, SessionUser, SignUpOutcome, SignUpRequest},
    AgencyServices, PageContext,
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Everything a gated handler works with: the caller's session, services
/// bound to that session's repositories, and the caller's board state.
#[derive(Clone)]
pub struct SessionScope {
    pub session: Session,
    pub services: Arc<AgencyServices>,
    pub page: Arc<Mutex<PageContext>>,
}

impl SessionScope {
    pub fn open(state: &AppState, session: Session) -> ApiResult<Self> {
        let repositories = state.provider.repositories(&session)?;
        let services = Arc::new(AgencyServices::new(repositories, state.clock));
        let page = state.pages.for_user(&session.user.id);
        Ok(Self {
            session,
            services,
            page,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.session.user.id
    }
}

/// Extracts the token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return None;
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Session gate in front of every protected route. Rejections answer 401 so
/// the client can send the user back to the login page.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).map(str::to_string);
    let session = state.auth.require_session(token.as_deref()).await?;
    let scope = SessionScope::open(&state, session)?;
    request.extensions_mut().insert(scope);
    Ok(next.run(request).await)
}

#[derive(Serialize)]
struct SessionInfo {
    user: SessionUser,
    expires_at: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    responses(
        (status = 200, description = "Signed in"),
        (status = 401, description = "Invalid credentials or unconfirmed email")
    )
)]
pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<Session>> {
    let session = state.auth.sign_in(&credentials).await?;
    Ok(Json(session))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "auth",
    responses(
        (status = 200, description = "Signed in, or confirmation email sent"),
        (status = 400, description = "Invalid sign-up form"),
        (status = 409, description = "Email already registered")
    )
)]
pub(crate) async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignUpRequest>,
) -> ApiResult<Json<SignUpOutcome>> {
    let outcome = state.auth.sign_up(&request).await?;
    Ok(Json(outcome))
}

async fn current_session(Extension(scope): Extension<SessionScope>) -> Json<SessionInfo> {
    Json(SessionInfo {
        user: scope.session.user.clone(),
        expires_at: scope.session.expires_at,
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Signed out"),
        (status = 401, description = "No session")
    )
)]
pub(crate) async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<StatusCode> {
    state.auth.sign_out(&scope.session).await?;
    state.pages.discard(scope.user_id());
    Ok(StatusCode::NO_CONTENT)
}

/// Sign-in and sign-out events of the calling user.
async fn auth_events(
    State(state): State<Arc<AppState>>,
    Extension(scope): Extension<SessionScope>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let user_id = scope.session.user.id.clone();
    let receiver = BroadcastStream::new(state.auth.subscribe());
    let stream = tokio_stream::StreamExt::filter_map(receiver, move |event| match event {
        Ok(evt) if evt.user_id() == user_id => {
            match SseEvent::default().event(evt.name()).json_data(&evt) {
                Ok(sse_event) => Some(Ok(sse_event)),
                Err(err) => {
                    tracing::error!("Failed to serialize auth event {}: {}", evt.name(), err);
                    None
                }
            }
        }
        Ok(_) => None,
        Err(BroadcastStreamRecvError::Lagged(_)) => None,
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Routes reachable without a session.
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/session", get(current_session))
        .route("/auth/logout", post(logout))
        .route("/auth/events", get(auth_events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("bearer  abc ")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
