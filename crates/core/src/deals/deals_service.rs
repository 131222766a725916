use chrono::NaiveDate;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::deals_boards::{build_deal_board, build_player_board, PlayerBoard, TeamDealBoard};
use super::deals_feed::{build_feed, FeedItem};
use super::deals_model::{DealNote, NewDealNote, NewTeamDeal, TeamDeal};
use super::deals_traits::TeamDealRepositoryTrait;
use super::deals_transitions::{
    deal_stage_effect, player_status_effect, TransitionCommand, TransitionEffect,
};
use crate::constants::DEAL_REMINDER_TAG;
use crate::context::{DealHandOff, PageContext};
use crate::contracts::{ContractDraft, ContractServiceTrait};
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::players::PlayerRepositoryTrait;
use crate::refresh::{Collection, Mutation, RefreshSet};
use crate::reminders::{NewReminder, Reminder, ReminderRepositoryTrait};
use crate::teams::{search_teams, CatalogRepositoryTrait, Team};
use crate::utils::Clock;

pub const CONTRACT_MANAGER_UNAVAILABLE: &str =
    "Contract Manager not available. Please refresh the page.";
pub const CONTRACT_DATA_UNAVAILABLE: &str = "Error loading contract data. Please try again.";

/// Result of a board move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionOutcome {
    pub effect: TransitionEffect,
    pub refresh: RefreshSet,
    /// Set when the move signed a deal.
    pub hand_off: Option<DealHandOff>,
    /// Contract form opened by the hand-off.
    pub contract_draft: Option<ContractDraft>,
    /// Shown to the user when the stage was saved but the contract form could not open.
    pub alert: Option<String>,
}

impl TransitionOutcome {
    fn new(effect: TransitionEffect, refresh: RefreshSet) -> Self {
        Self {
            effect,
            refresh,
            hand_off: None,
            contract_draft: None,
            alert: None,
        }
    }
}

/// Reminder form opened from the team deals view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealReminderForm {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tag: Option<String>,
    /// One of the open player's deals, or none for a general reminder.
    #[serde(default)]
    pub team_deal_id: Option<String>,
}

/// Controller of the two pipeline boards.
///
/// Every mutation re-fetches the collections it touched, whether the write
/// succeeded or not; page state is never patched in place.
pub struct DealPipelineService {
    players: Arc<dyn PlayerRepositoryTrait>,
    deals: Arc<dyn TeamDealRepositoryTrait>,
    reminders: Arc<dyn ReminderRepositoryTrait>,
    catalog: Arc<dyn CatalogRepositoryTrait>,
    contract_manager: Option<Arc<dyn ContractServiceTrait>>,
    clock: Clock,
}

impl DealPipelineService {
    pub fn new(
        players: Arc<dyn PlayerRepositoryTrait>,
        deals: Arc<dyn TeamDealRepositoryTrait>,
        reminders: Arc<dyn ReminderRepositoryTrait>,
        catalog: Arc<dyn CatalogRepositoryTrait>,
    ) -> Self {
        Self {
            players,
            deals,
            reminders,
            catalog,
            contract_manager: None,
            clock: Clock::System,
        }
    }

    pub fn with_contract_manager(mut self, contract_manager: Arc<dyn ContractServiceTrait>) -> Self {
        self.contract_manager = Some(contract_manager);
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    // --- Loaders ---

    /// Loads the player board and the team catalog into the context.
    pub async fn load_board(&self, ctx: &mut PageContext) -> Result<PlayerBoard> {
        ctx.players = self.players.list_for_board().await?;
        ctx.teams = self.catalog.list_teams().await?;
        Ok(self.player_board(ctx))
    }

    pub fn player_board(&self, ctx: &PageContext) -> PlayerBoard {
        build_player_board(&ctx.players, self.clock.today())
    }

    /// Opens the team deals view for a player.
    pub async fn open_player(&self, ctx: &mut PageContext, player_id: &str) -> Result<TeamDealBoard> {
        let player = match ctx.players.iter().find(|p| p.id == player_id) {
            Some(player) => player.clone(),
            None => self.players.get_by_id(player_id).await?,
        };
        if ctx.teams.is_empty() {
            ctx.teams = self.catalog.list_teams().await?;
        }
        ctx.close_player();
        ctx.current_player = Some(player);
        self.reload(
            ctx,
            &RefreshSet::of([Collection::TeamDeals, Collection::DealReminders]),
        )
        .await?;
        self.deal_board(ctx)
    }

    pub fn deal_board(&self, ctx: &PageContext) -> Result<TeamDealBoard> {
        let player = ctx.current_player.as_ref().ok_or_else(no_player_selected)?;
        Ok(build_deal_board(
            player,
            &ctx.team_deals,
            &ctx.deal_reminders,
            self.clock.today(),
        ))
    }

    pub fn close_player(&self, ctx: &mut PageContext) {
        ctx.close_player();
    }

    /// Re-fetches the pipeline collections named in `refresh`.
    ///
    /// Collections owned by other pages are ignored. A failing reminder load
    /// leaves the feed empty instead of failing the view.
    pub async fn reload(&self, ctx: &mut PageContext, refresh: &RefreshSet) -> Result<()> {
        if refresh.contains(Collection::Players) {
            ctx.players = self.players.list_for_board().await?;
            if let Some(current_id) = ctx.current_player_id().map(str::to_string) {
                if let Some(fresh) = ctx.players.iter().find(|p| p.id == current_id) {
                    ctx.current_player = Some(fresh.clone());
                }
            }
        }

        let Some(player_id) = ctx.current_player_id().map(str::to_string) else {
            return Ok(());
        };

        if refresh.contains(Collection::TeamDeals) {
            ctx.team_deals = self.deals.list_for_player(&player_id).await?;
        }
        if refresh.contains(Collection::DealReminders) || refresh.contains(Collection::TeamDeals) {
            let deal_ids = ctx.deal_ids();
            ctx.deal_reminders = if deal_ids.is_empty() {
                Vec::new()
            } else {
                match self.reminders.list_open_for_deals(&deal_ids).await {
                    Ok(reminders) => reminders,
                    Err(err) => {
                        warn!("Failed to load deal reminders for player {}: {}", player_id, err);
                        Vec::new()
                    }
                }
            };
        }
        Ok(())
    }

    /// Reload that never masks the error of the write it follows.
    async fn reload_after_write(&self, ctx: &mut PageContext, refresh: &RefreshSet) {
        if let Err(err) = self.reload(ctx, refresh).await {
            warn!("Reload after pipeline write failed: {}", err);
        }
    }

    // --- Transitions ---

    pub async fn transition(
        &self,
        ctx: &mut PageContext,
        command: TransitionCommand,
    ) -> Result<TransitionOutcome> {
        match command {
            TransitionCommand::PlayerStatus {
                player_id,
                from: claimed,
                to,
            } => {
                let current = match ctx.players.iter().find(|p| p.id == player_id) {
                    Some(player) => player.player_deal_status,
                    None => self.players.get_by_id(&player_id).await?.player_deal_status,
                };
                if current != claimed {
                    debug!(
                        "Player {} is {} but the move claimed {}",
                        player_id, current, claimed
                    );
                }
                let effect = player_status_effect(current, to)?;
                if effect == TransitionEffect::NoOp {
                    return Ok(TransitionOutcome::new(effect, RefreshSet::new()));
                }

                let refresh = RefreshSet::of([Collection::Players]);
                let result = self.players.set_deal_status(&player_id, to).await;
                self.reload_after_write(ctx, &refresh).await;
                result?;
                info!("Player {} moved from {} to {}", player_id, current, to);
                Ok(TransitionOutcome::new(effect, refresh))
            }
            TransitionCommand::DealStage {
                deal_id,
                from: claimed,
                to,
            } => {
                let deal = ctx.find_deal(&deal_id).cloned().ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(format!("Deal {} not found", deal_id)))
                })?;
                if deal.deal_stage != claimed {
                    debug!(
                        "Deal {} is {} but the move claimed {}",
                        deal_id, deal.deal_stage, claimed
                    );
                }
                let effect = deal_stage_effect(deal.deal_stage, to)?;
                if effect == TransitionEffect::NoOp {
                    return Ok(TransitionOutcome::new(effect, RefreshSet::new()));
                }

                let refresh = RefreshSet::of([Collection::Players, Collection::TeamDeals]);
                let result = self.deals.update_stage(&deal_id, to, self.clock.now()).await;
                self.reload_after_write(ctx, &refresh).await;
                result?;
                info!("Deal {} moved from {} to {}", deal_id, deal.deal_stage, to);

                let mut outcome = TransitionOutcome::new(effect, refresh);
                if effect == TransitionEffect::PersistStageAndOpenContract {
                    self.hand_off_to_contract_manager(ctx, &deal, &mut outcome).await;
                }
                Ok(outcome)
            }
        }
    }

    /// Opens the contract form for a freshly signed deal.
    ///
    /// The stage write is already committed; a missing or failing contract
    /// manager only produces an alert.
    async fn hand_off_to_contract_manager(
        &self,
        ctx: &mut PageContext,
        deal: &TeamDeal,
        outcome: &mut TransitionOutcome,
    ) {
        let hand_off = DealHandOff {
            deal_id: deal.id.clone(),
            team_id: deal.team_id.clone(),
            team_name: deal.team_name().to_string(),
            competition_id: deal.competition_id().map(str::to_string),
        };
        ctx.hand_off = Some(hand_off.clone());
        outcome.hand_off = Some(hand_off);

        let Some(contract_manager) = &self.contract_manager else {
            warn!("Deal {} signed but no contract manager is available", deal.id);
            outcome.alert = Some(CONTRACT_MANAGER_UNAVAILABLE.to_string());
            return;
        };

        match contract_manager.open_draft(ctx, &deal.player_id).await {
            Ok(draft) => outcome.contract_draft = Some(draft),
            Err(err) => {
                error!("Failed to open contract form for deal {}: {}", deal.id, err);
                outcome.alert = Some(CONTRACT_DATA_UNAVAILABLE.to_string());
            }
        }
    }

    // --- Deals, notes and reminders ---

    /// Catalog teams not yet in the open player's pipeline.
    pub fn available_teams(&self, ctx: &PageContext, search: &str) -> Vec<Team> {
        search_teams(&ctx.teams, search)
            .into_iter()
            .filter(|team| ctx.find_deal_by_team(&team.id).is_none())
            .cloned()
            .collect()
    }

    pub async fn create_team_deal(
        &self,
        ctx: &mut PageContext,
        team_id: &str,
    ) -> Result<Mutation<TeamDeal>> {
        let player_id = ctx
            .current_player_id()
            .ok_or_else(no_player_selected)?
            .to_string();
        if ctx.find_deal_by_team(team_id).is_some() {
            return Err(Error::ConstraintViolation(
                "This team is already in the player's pipeline".to_string(),
            ));
        }
        let new_deal = NewTeamDeal {
            player_id,
            team_id: team_id.to_string(),
            user_id: ctx.user_id.clone(),
        };
        new_deal.validate()?;

        let refresh = RefreshSet::of([Collection::Players, Collection::TeamDeals]);
        let result = self.deals.create(new_deal).await;
        self.reload_after_write(ctx, &refresh).await;
        let deal = result?;
        debug!("Opened deal {} with team {}", deal.id, team_id);
        Ok(Mutation::new(deal, refresh))
    }

    /// Appends a note to the open player's deal with `team_id`.
    pub async fn add_note(
        &self,
        ctx: &mut PageContext,
        team_id: Option<&str>,
        note_text: &str,
    ) -> Result<Mutation<DealNote>> {
        let team_id = team_id
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ValidationError::InvalidInput("Please select a team".to_string()))?;
        let deal = ctx.find_deal_by_team(team_id).ok_or_else(|| {
            ValidationError::InvalidInput("Deal not found for selected team".to_string())
        })?;
        let new_note = NewDealNote {
            team_deal_id: deal.id.clone(),
            note_text: note_text.trim().to_string(),
            deal_stage_at_time: Some(deal.deal_stage),
            user_id: ctx.user_id.clone(),
        };
        new_note.validate()?;

        let refresh = RefreshSet::of([Collection::TeamDeals]);
        let result = self.deals.add_note(new_note).await;
        self.reload_after_write(ctx, &refresh).await;
        Ok(Mutation::new(result?, refresh))
    }

    pub async fn add_reminder(
        &self,
        ctx: &mut PageContext,
        form: DealReminderForm,
    ) -> Result<Mutation<Reminder>> {
        let player_id = ctx
            .current_player_id()
            .ok_or_else(no_player_selected)?
            .to_string();
        let team_deal_id = form.team_deal_id.filter(|id| !id.trim().is_empty());
        if let Some(deal_id) = &team_deal_id {
            if ctx.find_deal(deal_id).is_none() {
                return Err(ValidationError::InvalidInput(
                    "The selected deal does not belong to this player".to_string(),
                )
                .into());
            }
        }
        let new_reminder = NewReminder {
            title: form.title,
            description: form.description,
            due_date: form.due_date,
            tag: form.tag.or_else(|| Some(DEAL_REMINDER_TAG.to_string())),
            player_id: Some(player_id),
            team_deal_id,
            contract_id: None,
        };
        new_reminder.validate()?;

        let refresh = RefreshSet::of([Collection::DealReminders, Collection::Reminders]);
        let result = self.reminders.create(new_reminder.cleaned()).await;
        self.reload_after_write(ctx, &refresh).await;
        Ok(Mutation::new(result?, refresh))
    }

    pub async fn set_reminder_completed(
        &self,
        ctx: &mut PageContext,
        reminder_id: &str,
        completed: bool,
    ) -> Result<Mutation<Reminder>> {
        let refresh = RefreshSet::of([Collection::DealReminders, Collection::Reminders]);
        let result = self.reminders.set_completed(reminder_id, completed).await;
        self.reload_after_write(ctx, &refresh).await;
        Ok(Mutation::new(result?, refresh))
    }

    pub fn feed(&self, ctx: &PageContext, team_filter: Option<&str>) -> Vec<FeedItem> {
        build_feed(
            &ctx.team_deals,
            &ctx.deal_reminders,
            team_filter.filter(|t| !t.is_empty()),
            self.clock.today(),
        )
    }
}

fn no_player_selected() -> Error {
    Error::Validation(ValidationError::InvalidInput(
        "No player selected".to_string(),
    ))
}
