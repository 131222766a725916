use std::sync::Arc;

use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{auth, config::Config, main_lib::AppState};

pub mod calendar;
pub mod contacts;
pub mod contracts;
pub mod payments;
pub mod pipeline;
pub mod players;
pub mod reminders;

/// Body of the completion toggles.
#[derive(Debug, Deserialize)]
pub struct CompletedRequest {
    pub completed: bool,
}

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        crate::auth::login,
        crate::auth::signup,
        crate::auth::logout,
        crate::api::calendar::calendar_feed,
    ),
    tags(
        (name = "auth", description = "Sign-in, sign-up and sign-out"),
        (name = "calendar", description = "Reminder calendar feed")
    )
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };
    cors.allow_methods(Any).allow_headers(Any)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    let gated = Router::new()
        .merge(auth::router())
        .merge(players::router())
        .merge(pipeline::router())
        .merge(contracts::router())
        .merge(payments::router())
        .merge(reminders::router())
        .merge(contacts::router())
        .merge(calendar::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/openapi.json", get(move || async move { Json(openapi) }))
        .merge(auth::public_router())
        .merge(calendar::public_router())
        .merge(gated);

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
