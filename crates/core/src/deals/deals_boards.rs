//! Kanban boards of the deal pipeline.
//!
//! Both boards are pure functions of the loaded arrays, so rendering the same
//! state twice produces identical views.

use chrono::NaiveDate;
use serde::Serialize;

use super::deals_model::{DealStage, TeamDeal};
use crate::constants::NOTE_PREVIEW_CHARS;
use crate::players::{Player, PlayerDealStatus};
use crate::reminders::Reminder;
use crate::utils::{days_ago_label, initials, preview, AGENCY_TZ};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerCard {
    pub player_id: String,
    pub name: String,
    pub initials: String,
    pub position: String,
    pub age: Option<u32>,
    /// Deals still ongoing or sent.
    pub active_deals: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerColumn {
    pub status: PlayerDealStatus,
    pub label: String,
    pub count: usize,
    pub cards: Vec<PlayerCard>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerBoard {
    pub columns: Vec<PlayerColumn>,
}

pub fn build_player_board(players: &[Player], today: NaiveDate) -> PlayerBoard {
    let columns = PlayerDealStatus::ALL
        .into_iter()
        .map(|status| {
            let cards: Vec<PlayerCard> = players
                .iter()
                .filter(|p| p.player_deal_status == status)
                .map(|p| PlayerCard {
                    player_id: p.id.clone(),
                    name: p.full_name(),
                    initials: initials(&p.first_name, &p.last_name),
                    position: p.position.clone().unwrap_or_else(|| "N/A".to_string()),
                    age: p.age_on(today),
                    active_deals: p.active_deal_count(),
                })
                .collect();
            PlayerColumn {
                status,
                label: status.label().to_string(),
                count: cards.len(),
                placeholder: cards.is_empty().then(|| "No players".to_string()),
                cards,
            }
        })
        .collect();
    PlayerBoard { columns }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealCard {
    pub deal_id: String,
    pub team_id: String,
    pub team_name: String,
    pub competition_name: Option<String>,
    pub updated_label: String,
    pub last_note_preview: Option<String>,
    pub open_reminders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealColumn {
    pub stage: DealStage,
    pub label: String,
    pub count: usize,
    pub cards: Vec<DealCard>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamDealBoard {
    pub player_id: String,
    pub player_name: String,
    pub player_status: PlayerDealStatus,
    pub columns: Vec<DealColumn>,
}

pub fn build_deal_board(
    player: &Player,
    deals: &[TeamDeal],
    reminders: &[Reminder],
    today: NaiveDate,
) -> TeamDealBoard {
    let columns = DealStage::ALL
        .into_iter()
        .map(|stage| {
            let cards: Vec<DealCard> = deals
                .iter()
                .filter(|d| d.deal_stage == stage)
                .map(|d| DealCard {
                    deal_id: d.id.clone(),
                    team_id: d.team_id.clone(),
                    team_name: d.team_name().to_string(),
                    competition_name: d.competition_name().map(str::to_string),
                    updated_label: days_ago_label(
                        d.updated_at.with_timezone(&AGENCY_TZ).date_naive(),
                        today,
                    ),
                    last_note_preview: d
                        .latest_note()
                        .map(|note| preview(&note.note_text, NOTE_PREVIEW_CHARS)),
                    open_reminders: reminders
                        .iter()
                        .filter(|r| !r.completed && r.team_deal_id.as_deref() == Some(d.id.as_str()))
                        .count(),
                })
                .collect();
            DealColumn {
                stage,
                label: stage.label().to_string(),
                count: cards.len(),
                placeholder: cards.is_empty().then(|| "No deals".to_string()),
                cards,
            }
        })
        .collect();

    TeamDealBoard {
        player_id: player.id.clone(),
        player_name: player.full_name(),
        player_status: player.player_deal_status,
        columns,
    }
}
