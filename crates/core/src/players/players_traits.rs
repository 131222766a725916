//! Player repository and service traits.

use async_trait::async_trait;

use super::players_model::{NewPlayer, Player, PlayerDealStatus, PlayerUpdate};
use super::players_roster::{PlayerDetail, RosterFilter, RosterView};
use crate::errors::Result;
use crate::prospects::{NewProspect, Prospect};
use crate::refresh::Mutation;

/// Persistence contract for players.
#[async_trait]
pub trait PlayerRepositoryTrait: Send + Sync {
    /// Roster listing: newest first, with the current contract and its team.
    async fn list(&self) -> Result<Vec<Player>>;

    /// Board listing: ordered by last name, with deal summaries embedded.
    async fn list_for_board(&self) -> Result<Vec<Player>>;

    async fn get_by_id(&self, player_id: &str) -> Result<Player>;

    /// Inserts a player with status `free_agent`.
    async fn create(&self, new_player: NewPlayer) -> Result<Player>;

    async fn update(&self, player_update: PlayerUpdate) -> Result<Player>;

    /// Returns the number of deleted records.
    async fn delete(&self, player_id: &str) -> Result<usize>;

    async fn set_deal_status(&self, player_id: &str, status: PlayerDealStatus) -> Result<()>;

    /// Sets status `signed` and points the player at its active contract.
    async fn mark_signed(&self, player_id: &str, contract_id: &str) -> Result<()>;
}

/// Players page operations.
#[async_trait]
pub trait PlayerServiceTrait: Send + Sync {
    async fn roster(&self, filter: &RosterFilter) -> Result<RosterView>;

    async fn get_player(&self, player_id: &str) -> Result<Player>;

    async fn player_detail(&self, player_id: &str) -> Result<PlayerDetail>;

    async fn create_player(&self, new_player: NewPlayer) -> Result<Mutation<Player>>;

    async fn update_player(&self, player_update: PlayerUpdate) -> Result<Mutation<Player>>;

    async fn delete_player(&self, player_id: &str) -> Result<Mutation<()>>;

    async fn create_prospect(&self, new_prospect: NewProspect) -> Result<Mutation<Prospect>>;

    /// Copies a prospect into a new free-agent player and flags the prospect.
    async fn convert_prospect(&self, prospect_id: &str) -> Result<Mutation<Player>>;
}
