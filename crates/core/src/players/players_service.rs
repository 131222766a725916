use log::{debug, info};
use std::sync::Arc;

use super::players_model::{NewPlayer, Player, PlayerUpdate};
use super::players_roster::{build_roster, PlayerDetail, RosterFilter, RosterView};
use super::players_traits::{PlayerRepositoryTrait, PlayerServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::prospects::{NewProspect, Prospect, ProspectRepositoryTrait};
use crate::refresh::{Collection, Mutation, RefreshSet};
use crate::utils::Clock;

/// Service behind the players page: roster, detail and the add/edit forms.
pub struct PlayerService {
    players: Arc<dyn PlayerRepositoryTrait>,
    prospects: Arc<dyn ProspectRepositoryTrait>,
    clock: Clock,
}

impl PlayerService {
    pub fn new(
        players: Arc<dyn PlayerRepositoryTrait>,
        prospects: Arc<dyn ProspectRepositoryTrait>,
    ) -> Self {
        Self {
            players,
            prospects,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait::async_trait]
impl PlayerServiceTrait for PlayerService {
    async fn roster(&self, filter: &RosterFilter) -> Result<RosterView> {
        let players = self.players.list().await?;
        let prospects = self.prospects.list_open().await?;
        Ok(build_roster(
            &players,
            &prospects,
            filter,
            self.clock.today(),
        ))
    }

    async fn get_player(&self, player_id: &str) -> Result<Player> {
        self.players.get_by_id(player_id).await
    }

    async fn player_detail(&self, player_id: &str) -> Result<PlayerDetail> {
        let player = self.players.get_by_id(player_id).await?;
        Ok(PlayerDetail::new(player, self.clock.today()))
    }

    async fn create_player(&self, new_player: NewPlayer) -> Result<Mutation<Player>> {
        new_player.validate()?;
        let new_player = NewPlayer {
            first_name: new_player.first_name.trim().to_string(),
            last_name: new_player.last_name.trim().to_string(),
            position: super::players_model::clean_optional(new_player.position),
            email: super::players_model::clean_optional(new_player.email),
            phone: super::players_model::clean_optional(new_player.phone),
            ..new_player
        };
        debug!("Creating player {} {}", new_player.first_name, new_player.last_name);
        let player = self.players.create(new_player).await?;
        Ok(Mutation::new(player, RefreshSet::of([Collection::Players])))
    }

    async fn update_player(&self, player_update: PlayerUpdate) -> Result<Mutation<Player>> {
        player_update.validate()?;
        let player = self.players.update(player_update).await?;
        Ok(Mutation::new(player, RefreshSet::of([Collection::Players])))
    }

    async fn delete_player(&self, player_id: &str) -> Result<Mutation<()>> {
        self.players.delete(player_id).await?;
        info!("Deleted player {}", player_id);
        Ok(Mutation::new((), RefreshSet::of([Collection::Players])))
    }

    async fn create_prospect(&self, new_prospect: NewProspect) -> Result<Mutation<Prospect>> {
        new_prospect.validate()?;
        let prospect = self.prospects.create(new_prospect).await?;
        Ok(Mutation::new(prospect, RefreshSet::of([Collection::Prospects])))
    }

    async fn convert_prospect(&self, prospect_id: &str) -> Result<Mutation<Player>> {
        let prospect = self.prospects.get_by_id(prospect_id).await?;
        if prospect.is_converted {
            return Err(ValidationError::InvalidInput(format!(
                "{} has already been converted to a player",
                prospect.full_name()
            ))
            .into());
        }

        let player = self.players.create(prospect.to_new_player()).await?;
        self.prospects
            .mark_converted(&prospect.id, &player.id)
            .await?;
        info!("Converted prospect {} into player {}", prospect.id, player.id);

        Ok(Mutation::new(
            player,
            RefreshSet::of([Collection::Players, Collection::Prospects]),
        ))
    }
}
