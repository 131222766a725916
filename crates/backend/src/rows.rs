//! Row shapes returned by the REST API, including embedded joins, and their
//! conversion into core domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use agentplay_core::contacts::Contact;
use agentplay_core::contracts::Contract;
use agentplay_core::deals::{DealNote, DealStage, DealSummary, TeamDeal};
use agentplay_core::payments::{Payment, PaymentStatus};
use agentplay_core::players::{CurrentContract, Player, PlayerDealStatus};
use agentplay_core::reminders::Reminder;
use agentplay_core::teams::Team;

pub const PLAYER_LIST_SELECT: &str = "
    *,
    current_contract:current_contract_id (
        id,
        contract_end_date,
        team:team_id ( name )
    )";

pub const PLAYER_BOARD_SELECT: &str = "
    *,
    team_deals ( id, team_id, deal_stage )";

pub const TEAM_SELECT: &str = "*, competition:competition_id ( name )";

pub const DEAL_SELECT: &str = "
    *,
    team:team_id (
        id, name, city, competition_id,
        competition:competition_id ( name )
    ),
    deal_notes ( * )";

pub const CONTRACT_SELECT: &str = "
    *,
    team:team_id ( name ),
    competition:competition_id ( name )";

pub const PAYMENT_SELECT: &str = "
    *,
    contract:contract_id (
        contract_value,
        commission_percentage,
        player:player_id ( first_name, last_name ),
        team:team_id ( name )
    )";

pub const REMINDER_SELECT: &str = "*, player:player_id ( first_name, last_name )";

pub const CONTACT_SELECT: &str = "
    *,
    team:team_id ( name ),
    player:player_id ( first_name, last_name )";

#[derive(Debug, Clone, Deserialize)]
pub struct NameRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonRef {
    pub first_name: String,
    pub last_name: String,
}

impl PersonRef {
    fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn name_of(reference: Option<NameRef>) -> Option<String> {
    reference.map(|r| r.name)
}

#[derive(Debug, Deserialize)]
pub struct CurrentContractRow {
    pub id: String,
    pub contract_end_date: NaiveDate,
    #[serde(default)]
    pub team: Option<NameRef>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub player_deal_status: Option<PlayerDealStatus>,
    #[serde(default)]
    pub current_contract_id: Option<String>,
    #[serde(default)]
    pub current_contract: Option<CurrentContractRow>,
    #[serde(default)]
    pub team_deals: Vec<DealSummary>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Player {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth: row.date_of_birth,
            position: row.position,
            email: row.email,
            phone: row.phone,
            player_deal_status: row.player_deal_status.unwrap_or_default(),
            current_contract_id: row.current_contract_id,
            current_contract: row.current_contract.map(|c| CurrentContract {
                id: c.id,
                contract_end_date: c.contract_end_date,
                team_name: name_of(c.team),
            }),
            team_deals: row.team_deals,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub competition_id: Option<String>,
    #[serde(default)]
    pub competition: Option<NameRef>,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team {
            id: row.id,
            name: row.name,
            city: row.city,
            competition_id: row.competition_id,
            competition_name: name_of(row.competition),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamDealRow {
    pub id: String,
    pub player_id: String,
    pub team_id: String,
    pub deal_stage: DealStage,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub team: Option<TeamRow>,
    #[serde(default)]
    pub deal_notes: Vec<DealNote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeamDealRow> for TeamDeal {
    fn from(row: TeamDealRow) -> Self {
        TeamDeal {
            id: row.id,
            player_id: row.player_id,
            team_id: row.team_id,
            deal_stage: row.deal_stage,
            user_id: row.user_id,
            team: row.team.map(Team::from),
            deal_notes: row.deal_notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContractRow {
    pub id: String,
    pub player_id: String,
    pub team_id: String,
    pub competition_id: String,
    pub contract_value: Decimal,
    pub commission_percentage: Decimal,
    pub contract_start_date: NaiveDate,
    pub contract_end_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub added_retroactively: bool,
    #[serde(default)]
    pub team_deal_id: Option<String>,
    #[serde(default)]
    pub team: Option<NameRef>,
    #[serde(default)]
    pub competition: Option<NameRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ContractRow> for Contract {
    fn from(row: ContractRow) -> Self {
        Contract {
            id: row.id,
            player_id: row.player_id,
            team_id: row.team_id,
            competition_id: row.competition_id,
            contract_value: row.contract_value,
            commission_percentage: row.commission_percentage,
            contract_start_date: row.contract_start_date,
            contract_end_date: row.contract_end_date,
            notes: row.notes,
            is_active: row.is_active,
            added_retroactively: row.added_retroactively,
            team_deal_id: row.team_deal_id,
            team_name: name_of(row.team),
            competition_name: name_of(row.competition),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PaymentContractRow {
    pub contract_value: Decimal,
    pub commission_percentage: Decimal,
    #[serde(default)]
    pub player: Option<PersonRef>,
    #[serde(default)]
    pub team: Option<NameRef>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentRow {
    pub id: String,
    pub contract_id: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub contract: Option<PaymentContractRow>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        let (player_name, team_name, contract_value, commission_percentage) = match row.contract {
            Some(c) => (
                c.player.as_ref().map(PersonRef::full_name),
                name_of(c.team),
                Some(c.contract_value),
                Some(c.commission_percentage),
            ),
            None => (None, None, None, None),
        };
        Payment {
            id: row.id,
            contract_id: row.contract_id,
            amount: row.amount,
            due_date: row.due_date,
            paid_date: row.paid_date,
            status: row.status,
            player_name,
            team_name,
            contract_value,
            commission_percentage,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReminderRow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub auto_generated: bool,
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub team_deal_id: Option<String>,
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub player: Option<PersonRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ReminderRow> for Reminder {
    fn from(row: ReminderRow) -> Self {
        Reminder {
            id: row.id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            tag: row.tag,
            completed: row.completed,
            auto_generated: row.auto_generated,
            player_id: row.player_id,
            team_deal_id: row.team_deal_id,
            contract_id: row.contract_id,
            player_name: row.player.as_ref().map(PersonRef::full_name),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub team: Option<NameRef>,
    #[serde(default)]
    pub player: Option<PersonRef>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id,
            name: row.name,
            role: row.role,
            email: row.email,
            phone: row.phone,
            team_id: row.team_id,
            player_id: row.player_id,
            notes: row.notes,
            team_name: name_of(row.team),
            player_name: row.player.as_ref().map(PersonRef::full_name),
        }
    }
}

/// Converts a list of rows into domain models.
pub fn into_models<R, M: From<R>>(rows: Vec<R>) -> Vec<M> {
    rows.into_iter().map(M::from).collect()
}
