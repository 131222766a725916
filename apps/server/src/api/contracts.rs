use std::sync::Arc;

use axum::{extract::Path, routing::post, Extension, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use agentplay_core::{
    contracts::{
        contract_save_refresh, CommissionPreview, ContractDraft, ContractForm, ContractSaveResult,
    },
    Mutation,
};

use crate::{auth::SessionScope, error::ApiResult, main_lib::AppState};

/// Raw form inputs, as typed.
#[derive(Deserialize)]
struct CommissionPreviewRequest {
    #[serde(default)]
    contract_value: String,
    #[serde(default)]
    commission_percentage: String,
}

#[derive(Deserialize)]
struct RetroactiveCheckRequest {
    contract_end_date: NaiveDate,
    #[serde(default)]
    added_retroactively: bool,
}

#[derive(Serialize)]
struct RetroactiveCheckResponse {
    suggest_retroactive: bool,
}

#[derive(Deserialize)]
struct SaveContractRequest {
    player_id: String,
    form: ContractForm,
}

async fn open_draft(
    Path(player_id): Path<String>,
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<ContractDraft>> {
    let mut page = scope.page.lock().await;
    let draft = scope
        .services
        .contracts
        .open_draft(&mut page, &player_id)
        .await?;
    Ok(Json(draft))
}

async fn commission_preview(
    Extension(scope): Extension<SessionScope>,
    Json(body): Json<CommissionPreviewRequest>,
) -> Json<CommissionPreview> {
    Json(
        scope
            .services
            .contracts
            .commission_preview(&body.contract_value, &body.commission_percentage),
    )
}

async fn retroactive_check(
    Extension(scope): Extension<SessionScope>,
    Json(body): Json<RetroactiveCheckRequest>,
) -> Json<RetroactiveCheckResponse> {
    let suggest_retroactive = scope
        .services
        .contracts
        .suggest_retroactive(body.contract_end_date, body.added_retroactively);
    Json(RetroactiveCheckResponse {
        suggest_retroactive,
    })
}

async fn save_contract(
    Extension(scope): Extension<SessionScope>,
    Json(body): Json<SaveContractRequest>,
) -> ApiResult<Json<Mutation<ContractSaveResult>>> {
    let mut page = scope.page.lock().await;
    let saved = scope
        .services
        .contracts
        .save(&mut page, &body.player_id, body.form)
        .await;
    // The cascade may have signed the open player; the boards are re-fetched either way.
    if let Err(err) = scope
        .services
        .pipeline
        .reload(&mut page, &contract_save_refresh())
        .await
    {
        tracing::warn!("Reload after contract save failed: {}", err);
    }
    Ok(Json(saved?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contracts", post(save_contract))
        .route("/contracts/draft/{player_id}", post(open_draft))
        .route("/contracts/commission-preview", post(commission_preview))
        .route("/contracts/retroactive-check", post(retroactive_check))
}
