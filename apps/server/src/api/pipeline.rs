//! The two negotiation boards. Each user's board state lives in the page
//! store; every handler holds that user's page lock for its whole run.

use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;

use agentplay_core::{
    deals::{
        DealNote, DealReminderForm, FeedItem, PlayerBoard, TeamDeal, TeamDealBoard,
        TransitionCommand, TransitionOutcome,
    },
    reminders::Reminder,
    teams::Team,
    Mutation,
};

use crate::{api::CompletedRequest, auth::SessionScope, error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Option<String>,
}

#[derive(Deserialize)]
struct FeedQuery {
    #[serde(default)]
    team_id: Option<String>,
}

#[derive(Deserialize)]
struct CreateDealRequest {
    team_id: String,
}

#[derive(Deserialize)]
struct NoteRequest {
    #[serde(default)]
    team_id: Option<String>,
    note_text: String,
}

async fn load_board(Extension(scope): Extension<SessionScope>) -> ApiResult<Json<PlayerBoard>> {
    let mut page = scope.page.lock().await;
    let board = scope.services.pipeline.load_board(&mut page).await?;
    Ok(Json(board))
}

async fn transition(
    Extension(scope): Extension<SessionScope>,
    Json(command): Json<TransitionCommand>,
) -> ApiResult<Json<TransitionOutcome>> {
    let mut page = scope.page.lock().await;
    let outcome = scope.services.pipeline.transition(&mut page, command).await?;
    Ok(Json(outcome))
}

async fn open_player(
    Path(id): Path<String>,
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<TeamDealBoard>> {
    let mut page = scope.page.lock().await;
    let board = scope.services.pipeline.open_player(&mut page, &id).await?;
    Ok(Json(board))
}

async fn current_deal_board(
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<TeamDealBoard>> {
    let page = scope.page.lock().await;
    let board = scope.services.pipeline.deal_board(&page)?;
    Ok(Json(board))
}

async fn close_player(Extension(scope): Extension<SessionScope>) -> StatusCode {
    let mut page = scope.page.lock().await;
    scope.services.pipeline.close_player(&mut page);
    StatusCode::NO_CONTENT
}

/// Navigating away from the pipeline page.
async fn leave_pipeline(Extension(scope): Extension<SessionScope>) -> StatusCode {
    scope.page.lock().await.reset();
    StatusCode::NO_CONTENT
}

async fn available_teams(
    Extension(scope): Extension<SessionScope>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Team>> {
    let page = scope.page.lock().await;
    let search = query.search.unwrap_or_default();
    Json(scope.services.pipeline.available_teams(&page, &search))
}

async fn create_deal(
    Extension(scope): Extension<SessionScope>,
    Json(body): Json<CreateDealRequest>,
) -> ApiResult<Json<Mutation<TeamDeal>>> {
    let mut page = scope.page.lock().await;
    let created = scope
        .services
        .pipeline
        .create_team_deal(&mut page, &body.team_id)
        .await?;
    Ok(Json(created))
}

async fn add_note(
    Extension(scope): Extension<SessionScope>,
    Json(body): Json<NoteRequest>,
) -> ApiResult<Json<Mutation<DealNote>>> {
    let mut page = scope.page.lock().await;
    let note = scope
        .services
        .pipeline
        .add_note(&mut page, body.team_id.as_deref(), &body.note_text)
        .await?;
    Ok(Json(note))
}

async fn add_reminder(
    Extension(scope): Extension<SessionScope>,
    Json(form): Json<DealReminderForm>,
) -> ApiResult<Json<Mutation<Reminder>>> {
    let mut page = scope.page.lock().await;
    let reminder = scope.services.pipeline.add_reminder(&mut page, form).await?;
    Ok(Json(reminder))
}

async fn set_reminder_completed(
    Path(id): Path<String>,
    Extension(scope): Extension<SessionScope>,
    Json(body): Json<CompletedRequest>,
) -> ApiResult<Json<Mutation<Reminder>>> {
    let mut page = scope.page.lock().await;
    let reminder = scope
        .services
        .pipeline
        .set_reminder_completed(&mut page, &id, body.completed)
        .await?;
    Ok(Json(reminder))
}

async fn activity_feed(
    Extension(scope): Extension<SessionScope>,
    Query(query): Query<FeedQuery>,
) -> Json<Vec<FeedItem>> {
    let page = scope.page.lock().await;
    Json(scope.services.pipeline.feed(&page, query.team_id.as_deref()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pipeline", delete(leave_pipeline))
        .route("/pipeline/board", get(load_board))
        .route("/pipeline/transition", post(transition))
        .route("/pipeline/players/{id}/open", post(open_player))
        .route(
            "/pipeline/current",
            get(current_deal_board).delete(close_player),
        )
        .route("/pipeline/teams/available", get(available_teams))
        .route("/pipeline/deals", post(create_deal))
        .route("/pipeline/notes", post(add_note))
        .route("/pipeline/reminders", post(add_reminder))
        .route(
            "/pipeline/reminders/{id}/completed",
            put(set_reminder_completed),
        )
        .route("/pipeline/feed", get(activity_feed))
}
