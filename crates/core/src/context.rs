//! Page-scoped state shared by the deal pipeline and the contract manager.
//!
//! One context lives per signed-in page. It is reset on navigation and is
//! always passed explicitly; nothing here is global.

use serde::{Deserialize, Serialize};

use crate::contracts::Contract;
use crate::deals::TeamDeal;
use crate::players::Player;
use crate::reminders::Reminder;
use crate::teams::Team;

/// Deal data handed from the pipeline to the contract form when a deal is signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealHandOff {
    pub deal_id: String,
    pub team_id: String,
    pub team_name: String,
    pub competition_id: Option<String>,
}

/// Contract form currently open for a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenContract {
    pub player_id: String,
    pub existing: Option<Contract>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageContext {
    pub user_id: Option<String>,
    /// Player board rows.
    pub players: Vec<Player>,
    /// Team catalog for the add-team dropdown.
    pub teams: Vec<Team>,
    pub current_player: Option<Player>,
    /// Deals of the current player, newest first.
    pub team_deals: Vec<TeamDeal>,
    /// Open reminders linked to the current player's deals.
    pub deal_reminders: Vec<Reminder>,
    pub hand_off: Option<DealHandOff>,
    pub open_contract: Option<OpenContract>,
}

impl PageContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    pub fn current_player_id(&self) -> Option<&str> {
        self.current_player.as_ref().map(|player| player.id.as_str())
    }

    pub fn find_deal(&self, deal_id: &str) -> Option<&TeamDeal> {
        self.team_deals.iter().find(|deal| deal.id == deal_id)
    }

    pub fn find_deal_by_team(&self, team_id: &str) -> Option<&TeamDeal> {
        self.team_deals.iter().find(|deal| deal.team_id == team_id)
    }

    pub fn deal_ids(&self) -> Vec<String> {
        self.team_deals.iter().map(|deal| deal.id.clone()).collect()
    }

    pub fn reminders_for_deal(&self, deal_id: &str) -> impl Iterator<Item = &Reminder> {
        let deal_id = deal_id.to_string();
        self.deal_reminders
            .iter()
            .filter(move |reminder| reminder.team_deal_id.as_deref() == Some(deal_id.as_str()))
    }

    /// Closes the team deals view.
    pub fn close_player(&mut self) {
        self.current_player = None;
        self.team_deals.clear();
        self.deal_reminders.clear();
    }

    /// Navigation away from the page drops everything but the user.
    pub fn reset(&mut self) {
        *self = Self {
            user_id: self.user_id.take(),
            ..Self::default()
        };
    }
}
