use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;

use agentplay_core::constants::Table;
use agentplay_core::deals::{DealNote, DealStage, NewDealNote, NewTeamDeal, TeamDeal, TeamDealRepositoryTrait};
use agentplay_core::errors::Result;

use super::RemoteRepository;
use crate::query::Query;
use crate::rows::{into_models, TeamDealRow, DEAL_SELECT};

#[async_trait]
impl TeamDealRepositoryTrait for RemoteRepository {
    async fn list_for_player(&self, player_id: &str) -> Result<Vec<TeamDeal>> {
        let query = Query::new()
            .select(DEAL_SELECT)
            .eq("player_id", player_id)
            .order("created_at", false);
        let rows: Vec<TeamDealRow> = self.rest.select(Table::TeamDeals, &query).await?;
        Ok(into_models(rows))
    }

    async fn create(&self, new_deal: NewTeamDeal) -> Result<TeamDeal> {
        let body = json!({
            "player_id": new_deal.player_id,
            "team_id": new_deal.team_id,
            "deal_stage": DealStage::Ongoing,
            "user_id": new_deal.user_id.unwrap_or_else(|| self.user_id.clone()),
        });
        let row: TeamDealRow = self
            .rest
            .insert(Table::TeamDeals, &body, &Query::new().select(DEAL_SELECT))
            .await?;
        Ok(row.into())
    }

    async fn update_stage(
        &self,
        deal_id: &str,
        stage: DealStage,
        updated_at: DateTime<Utc>,
    ) -> Result<TeamDeal> {
        let query = Query::new().select(DEAL_SELECT).eq("id", deal_id);
        let body = json!({ "deal_stage": stage, "updated_at": updated_at });
        let row: TeamDealRow = self.rest.update(Table::TeamDeals, &query, &body).await?;
        Ok(row.into())
    }

    async fn add_note(&self, new_note: NewDealNote) -> Result<DealNote> {
        let body = json!({
            "team_deal_id": new_note.team_deal_id,
            "note_text": new_note.note_text,
            "deal_stage_at_time": new_note.deal_stage_at_time,
            "user_id": new_note.user_id.unwrap_or_else(|| self.user_id.clone()),
        });
        self.rest
            .insert(Table::DealNotes, &body, &Query::new().select("*"))
            .await
    }
}
