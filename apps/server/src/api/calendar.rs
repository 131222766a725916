use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use agentplay_core::{calendar::CalendarSubscription, AgencyServices};

use crate::{auth::SessionScope, error::ApiResult, main_lib::AppState};

const ICAL_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct FeedQuery {
    /// Access token of the subscribing user.
    #[serde(default)]
    token: Option<String>,
}

/// Live feed polled by calendar applications. They cannot send headers, so
/// the access token travels in the query string.
#[utoipa::path(
    get,
    path = "/api/v1/calendar/feed",
    tag = "calendar",
    params(FeedQuery),
    responses(
        (status = 200, description = "iCalendar document"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub(crate) async fn calendar_feed(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Response> {
    let session = state.auth.require_session(query.token.as_deref()).await?;
    let services = AgencyServices::new(state.provider.repositories(&session)?, state.clock);
    let body = services.calendar.feed().await?;
    tracing::debug!("Served calendar feed to user {}", session.user.id);
    Ok((
        [(CONTENT_TYPE, ICAL_CONTENT_TYPE), (CACHE_CONTROL, "no-cache")],
        body,
    )
        .into_response())
}

async fn calendar_export(Extension(scope): Extension<SessionScope>) -> ApiResult<Response> {
    let export = scope.services.calendar.export().await?;
    Ok((
        [
            (CONTENT_TYPE, ICAL_CONTENT_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.content,
    )
        .into_response())
}

async fn calendar_subscription(
    State(state): State<Arc<AppState>>,
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<CalendarSubscription>> {
    let subscription = scope
        .services
        .calendar
        .subscription(&state.public_url, &scope.session.access_token)?;
    Ok(Json(subscription))
}

pub fn public_router() -> Router<Arc<AppState>> {
    Router::new().route("/calendar/feed", get(calendar_feed))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/calendar/export", get(calendar_export))
        .route("/calendar/subscription", get(calendar_subscription))
}
