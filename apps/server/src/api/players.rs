use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    routing::{get, post},
    Extension, Json, Router,
};

use agentplay_core::{
    contracts::Contract,
    players::{NewPlayer, Player, PlayerDetail, PlayerUpdate, RosterFilter, RosterView},
    prospects::{NewProspect, Prospect},
    teams::{Competition, Team},
    Mutation,
};

use crate::{auth::SessionScope, error::ApiResult, main_lib::AppState};

async fn list_players(
    Extension(scope): Extension<SessionScope>,
    Query(filter): Query<RosterFilter>,
) -> ApiResult<Json<RosterView>> {
    let view = scope.services.players.roster(&filter).await?;
    Ok(Json(view))
}

async fn create_player(
    Extension(scope): Extension<SessionScope>,
    Json(new_player): Json<NewPlayer>,
) -> ApiResult<Json<Mutation<Player>>> {
    let created = scope.services.players.create_player(new_player).await?;
    Ok(Json(created))
}

async fn get_player(
    Path(id): Path<String>,
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<Player>> {
    let player = scope.services.players.get_player(&id).await?;
    Ok(Json(player))
}

async fn update_player(
    Path(id): Path<String>,
    Extension(scope): Extension<SessionScope>,
    Json(mut update): Json<PlayerUpdate>,
) -> ApiResult<Json<Mutation<Player>>> {
    update.id = id;
    let updated = scope.services.players.update_player(update).await?;
    Ok(Json(updated))
}

async fn delete_player(
    Path(id): Path<String>,
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<Mutation<()>>> {
    let deleted = scope.services.players.delete_player(&id).await?;
    Ok(Json(deleted))
}

async fn player_detail(
    Path(id): Path<String>,
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<PlayerDetail>> {
    let detail = scope.services.players.player_detail(&id).await?;
    Ok(Json(detail))
}

async fn contract_history(
    Path(id): Path<String>,
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<Vec<Contract>>> {
    let history = scope.services.contracts.contract_history(&id).await?;
    Ok(Json(history))
}

async fn create_prospect(
    Extension(scope): Extension<SessionScope>,
    Json(new_prospect): Json<NewProspect>,
) -> ApiResult<Json<Mutation<Prospect>>> {
    let created = scope.services.players.create_prospect(new_prospect).await?;
    Ok(Json(created))
}

async fn convert_prospect(
    Path(id): Path<String>,
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<Mutation<Player>>> {
    let converted = scope.services.players.convert_prospect(&id).await?;
    Ok(Json(converted))
}

async fn list_teams(Extension(scope): Extension<SessionScope>) -> ApiResult<Json<Vec<Team>>> {
    let teams = scope.services.repositories.catalog.list_teams().await?;
    Ok(Json(teams))
}

async fn list_competitions(
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<Vec<Competition>>> {
    let competitions = scope.services.repositories.catalog.list_competitions().await?;
    Ok(Json(competitions))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/players", get(list_players).post(create_player))
        .route(
            "/players/{id}",
            get(get_player).put(update_player).delete(delete_player),
        )
        .route("/players/{id}/detail", get(player_detail))
        .route("/players/{id}/contracts", get(contract_history))
        .route("/prospects", post(create_prospect))
        .route("/prospects/{id}/convert", post(convert_prospect))
        .route("/teams", get(list_teams))
        .route("/competitions", get(list_competitions))
}
