use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::deals_model::{DealNote, DealStage, NewDealNote, NewTeamDeal, TeamDeal};
use crate::errors::Result;

#[async_trait]
pub trait TeamDealRepositoryTrait: Send + Sync {
    /// Deals of one player, newest first, with their team and notes embedded.
    async fn list_for_player(&self, player_id: &str) -> Result<Vec<TeamDeal>>;

    /// Inserts a deal in stage `ongoing`.
    async fn create(&self, new_deal: NewTeamDeal) -> Result<TeamDeal>;

    async fn update_stage(
        &self,
        deal_id: &str,
        stage: DealStage,
        updated_at: DateTime<Utc>,
    ) -> Result<TeamDeal>;

    async fn add_note(&self, new_note: NewDealNote) -> Result<DealNote>;
}
