//! Roster view built from the loaded players and prospects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::players_model::{Player, PlayerDealStatus};
use crate::prospects::Prospect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RosterTab {
    #[default]
    UnderManagement,
    Prospects,
    All,
}

/// Client-side filters of the players page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub status: Option<PlayerDealStatus>,
    #[serde(default)]
    pub tab: RosterTab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterKind {
    Player,
    Prospect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterRow {
    pub kind: RosterKind,
    pub id: String,
    pub full_name: String,
    pub position: Option<String>,
    pub age: Option<u32>,
    pub status: Option<PlayerDealStatus>,
    pub status_label: String,
    pub team_label: String,
    pub contract_expires: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterView {
    pub tab: RosterTab,
    pub player_count: usize,
    pub prospect_count: usize,
    pub rows: Vec<RosterRow>,
}

/// Player detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDetail {
    pub player: Player,
    pub age: Option<u32>,
    pub status_label: String,
    pub team_label: String,
    pub contract_expires: Option<NaiveDate>,
}

impl PlayerDetail {
    pub fn new(player: Player, today: NaiveDate) -> Self {
        Self {
            age: player.age_on(today),
            status_label: player.player_deal_status.label().to_string(),
            team_label: team_label(&player),
            contract_expires: player
                .current_contract
                .as_ref()
                .map(|contract| contract.contract_end_date),
            player,
        }
    }
}

fn team_label(player: &Player) -> String {
    player
        .current_contract
        .as_ref()
        .and_then(|contract| contract.team_name.clone())
        .unwrap_or_else(|| "Free Agent".to_string())
}

fn matches_search(needle: &str, fields: &[Option<&str>]) -> bool {
    needle.is_empty()
        || fields
            .iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
}

fn player_row(player: &Player, today: NaiveDate) -> RosterRow {
    RosterRow {
        kind: RosterKind::Player,
        id: player.id.clone(),
        full_name: player.full_name(),
        position: player.position.clone(),
        age: player.age_on(today),
        status: Some(player.player_deal_status),
        status_label: player.player_deal_status.label().to_string(),
        team_label: team_label(player),
        contract_expires: player
            .current_contract
            .as_ref()
            .map(|contract| contract.contract_end_date),
        email: player.email.clone(),
        phone: player.phone.clone(),
    }
}

fn prospect_row(prospect: &Prospect) -> RosterRow {
    RosterRow {
        kind: RosterKind::Prospect,
        id: prospect.id.clone(),
        full_name: prospect.full_name(),
        position: None,
        age: None,
        status: None,
        status_label: "Prospect".to_string(),
        team_label: "-".to_string(),
        contract_expires: None,
        email: prospect.email.clone(),
        phone: prospect.phone.clone(),
    }
}

/// Filters and flattens the loaded arrays into table rows.
///
/// Position and status filters only apply to players; a prospect has neither,
/// so it drops out whenever one of them is set. Tab counts are unfiltered.
pub fn build_roster(
    players: &[Player],
    prospects: &[Prospect],
    filter: &RosterFilter,
    today: NaiveDate,
) -> RosterView {
    let needle = filter
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();
    let position = filter.position.as_deref().filter(|p| !p.is_empty());

    let mut rows = Vec::new();
    if filter.tab != RosterTab::Prospects {
        rows.extend(
            players
                .iter()
                .filter(|p| {
                    matches_search(
                        &needle,
                        &[
                            Some(p.first_name.as_str()),
                            Some(p.last_name.as_str()),
                            p.email.as_deref(),
                        ],
                    )
                })
                .filter(|p| position.map_or(true, |pos| p.position.as_deref() == Some(pos)))
                .filter(|p| filter.status.map_or(true, |s| p.player_deal_status == s))
                .map(|p| player_row(p, today)),
        );
    }
    if filter.tab != RosterTab::UnderManagement && position.is_none() && filter.status.is_none()
    {
        rows.extend(
            prospects
                .iter()
                .filter(|p| !p.is_converted)
                .filter(|p| {
                    matches_search(
                        &needle,
                        &[
                            Some(p.first_name.as_str()),
                            Some(p.last_name.as_str()),
                            p.email.as_deref(),
                        ],
                    )
                })
                .map(prospect_row),
        );
    }

    RosterView {
        tab: filter.tab,
        player_count: players.len(),
        prospect_count: prospects.iter().filter(|p| !p.is_converted).count(),
        rows,
    }
}
