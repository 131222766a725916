use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, put},
    Extension, Json, Router,
};
use chrono::Datelike;
use serde::Deserialize;

use agentplay_core::{
    reminders::{MonthGrid, NewReminder, Reminder, UpcomingReminder},
    Mutation,
};

use crate::{api::CompletedRequest, auth::SessionScope, error::ApiResult, main_lib::AppState};

/// Month shown by the calendar; defaults to the current one.
#[derive(Deserialize)]
struct MonthQuery {
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    month: Option<u32>,
}

async fn list_reminders(Extension(scope): Extension<SessionScope>) -> ApiResult<Json<Vec<Reminder>>> {
    let reminders = scope.services.reminders.list_reminders().await?;
    Ok(Json(reminders))
}

async fn create_reminder(
    Extension(scope): Extension<SessionScope>,
    Json(new_reminder): Json<NewReminder>,
) -> ApiResult<Json<Mutation<Reminder>>> {
    let created = scope.services.reminders.create_reminder(new_reminder).await?;
    Ok(Json(created))
}

async fn upcoming_reminders(
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<Vec<UpcomingReminder>>> {
    let upcoming = scope.services.reminders.upcoming().await?;
    Ok(Json(upcoming))
}

async fn month_view(
    State(state): State<Arc<AppState>>,
    Extension(scope): Extension<SessionScope>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<MonthGrid>> {
    let today = state.clock.today();
    let grid = scope
        .services
        .reminders
        .month(
            query.year.unwrap_or_else(|| today.year()),
            query.month.unwrap_or_else(|| today.month()),
        )
        .await?;
    Ok(Json(grid))
}

async fn set_completed(
    Path(id): Path<String>,
    Extension(scope): Extension<SessionScope>,
    Json(body): Json<CompletedRequest>,
) -> ApiResult<Json<Mutation<Reminder>>> {
    let reminder = scope
        .services
        .reminders
        .set_completed(&id, body.completed)
        .await?;
    Ok(Json(reminder))
}

async fn delete_reminder(
    Path(id): Path<String>,
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<Mutation<()>>> {
    let deleted = scope.services.reminders.delete_reminder(&id).await?;
    Ok(Json(deleted))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reminders", get(list_reminders).post(create_reminder))
        .route("/reminders/upcoming", get(upcoming_reminders))
        .route("/reminders/month", get(month_view))
        .route("/reminders/{id}/completed", put(set_completed))
        .route("/reminders/{id}", delete(delete_reminder))
}
