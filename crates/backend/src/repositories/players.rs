use async_trait::async_trait;
use serde_json::json;

use agentplay_core::constants::Table;
use agentplay_core::errors::Result;
use agentplay_core::players::{NewPlayer, Player, PlayerDealStatus, PlayerRepositoryTrait, PlayerUpdate};
use agentplay_core::prospects::{NewProspect, Prospect, ProspectRepositoryTrait};
use agentplay_core::teams::{CatalogRepositoryTrait, Competition, Team};

use super::RemoteRepository;
use crate::query::Query;
use crate::rows::{into_models, PlayerRow, TeamRow, PLAYER_BOARD_SELECT, PLAYER_LIST_SELECT, TEAM_SELECT};

#[async_trait]
impl PlayerRepositoryTrait for RemoteRepository {
    async fn list(&self) -> Result<Vec<Player>> {
        let query = Query::new()
            .select(PLAYER_LIST_SELECT)
            .order("created_at", false);
        let rows: Vec<PlayerRow> = self.rest.select(Table::Players, &query).await?;
        Ok(into_models(rows))
    }

    async fn list_for_board(&self) -> Result<Vec<Player>> {
        let query = Query::new()
            .select(PLAYER_BOARD_SELECT)
            .order("last_name", true);
        let rows: Vec<PlayerRow> = self.rest.select(Table::Players, &query).await?;
        Ok(into_models(rows))
    }

    async fn get_by_id(&self, player_id: &str) -> Result<Player> {
        let query = Query::new().select(PLAYER_LIST_SELECT).eq("id", player_id);
        let row: PlayerRow = self.rest.select_single(Table::Players, &query).await?;
        Ok(row.into())
    }

    async fn create(&self, new_player: NewPlayer) -> Result<Player> {
        let body = json!({
            "first_name": new_player.first_name,
            "last_name": new_player.last_name,
            "date_of_birth": new_player.date_of_birth,
            "position": new_player.position,
            "email": new_player.email,
            "phone": new_player.phone,
            "player_deal_status": PlayerDealStatus::FreeAgent,
        });
        let row: PlayerRow = self
            .rest
            .insert(Table::Players, &body, &Query::new().select("*"))
            .await?;
        Ok(row.into())
    }

    async fn update(&self, player_update: PlayerUpdate) -> Result<Player> {
        let body = json!({
            "first_name": player_update.first_name,
            "last_name": player_update.last_name,
            "date_of_birth": player_update.date_of_birth,
            "position": player_update.position,
            "email": player_update.email,
            "phone": player_update.phone,
        });
        let query = Query::new()
            .select(PLAYER_LIST_SELECT)
            .eq("id", &player_update.id);
        let row: PlayerRow = self.rest.update(Table::Players, &query, &body).await?;
        Ok(row.into())
    }

    async fn delete(&self, player_id: &str) -> Result<usize> {
        self.rest
            .delete(Table::Players, &Query::new().eq("id", player_id))
            .await
    }

    async fn set_deal_status(&self, player_id: &str, status: PlayerDealStatus) -> Result<()> {
        let query = Query::new().select("id").eq("id", player_id);
        let _: serde_json::Value = self
            .rest
            .update(Table::Players, &query, &json!({ "player_deal_status": status }))
            .await?;
        Ok(())
    }

    async fn mark_signed(&self, player_id: &str, contract_id: &str) -> Result<()> {
        let query = Query::new().select("id").eq("id", player_id);
        let body = json!({
            "player_deal_status": PlayerDealStatus::Signed,
            "current_contract_id": contract_id,
        });
        let _: serde_json::Value = self.rest.update(Table::Players, &query, &body).await?;
        Ok(())
    }
}

#[async_trait]
impl ProspectRepositoryTrait for RemoteRepository {
    async fn list_open(&self) -> Result<Vec<Prospect>> {
        let query = Query::new()
            .select("*")
            .eq("is_converted", false)
            .order("created_at", false);
        self.rest.select(Table::Prospects, &query).await
    }

    async fn get_by_id(&self, prospect_id: &str) -> Result<Prospect> {
        let query = Query::new().select("*").eq("id", prospect_id);
        self.rest.select_single(Table::Prospects, &query).await
    }

    async fn create(&self, new_prospect: NewProspect) -> Result<Prospect> {
        self.rest
            .insert(Table::Prospects, &new_prospect, &Query::new().select("*"))
            .await
    }

    async fn mark_converted(&self, prospect_id: &str, player_id: &str) -> Result<Prospect> {
        let query = Query::new().select("*").eq("id", prospect_id);
        let body = json!({ "is_converted": true, "converted_player_id": player_id });
        self.rest.update(Table::Prospects, &query, &body).await
    }
}

#[async_trait]
impl CatalogRepositoryTrait for RemoteRepository {
    async fn list_teams(&self) -> Result<Vec<Team>> {
        let query = Query::new().select(TEAM_SELECT).order("name", true);
        let rows: Vec<TeamRow> = self.rest.select(Table::Teams, &query).await?;
        Ok(into_models(rows))
    }

    async fn list_competitions(&self) -> Result<Vec<Competition>> {
        let query = Query::new().select("*").order("name", true);
        self.rest.select(Table::Competitions, &query).await
    }
}
