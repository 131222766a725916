//! Player domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::deals::DealSummary;
use crate::errors::ValidationError;
use crate::utils::age_on;
use crate::{Error, Result};

/// Aggregate negotiation status of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerDealStatus {
    #[default]
    FreeAgent,
    InNegotiation,
    Signed,
}

impl PlayerDealStatus {
    /// Board column order.
    pub const ALL: [PlayerDealStatus; 3] = [
        PlayerDealStatus::FreeAgent,
        PlayerDealStatus::InNegotiation,
        PlayerDealStatus::Signed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerDealStatus::FreeAgent => "free_agent",
            PlayerDealStatus::InNegotiation => "in_negotiation",
            PlayerDealStatus::Signed => "signed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlayerDealStatus::FreeAgent => "Free Agent",
            PlayerDealStatus::InNegotiation => "In Negotiation",
            PlayerDealStatus::Signed => "Signed",
        }
    }
}

impl std::fmt::Display for PlayerDealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlayerDealStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PlayerDealStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown player status '{}'",
                    s
                )))
            })
    }
}

/// The active contract embedded in player rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentContract {
    pub id: String,
    pub contract_end_date: NaiveDate,
    #[serde(default)]
    pub team_name: Option<String>,
}

/// Domain model representing a player under management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
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
    pub player_deal_status: PlayerDealStatus,
    #[serde(default)]
    pub current_contract_id: Option<String>,
    #[serde(default)]
    pub current_contract: Option<CurrentContract>,
    #[serde(default)]
    pub team_deals: Vec<DealSummary>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.date_of_birth.map(|dob| age_on(dob, today))
    }

    /// Deals still ongoing or sent.
    pub fn active_deal_count(&self) -> usize {
        self.team_deals
            .iter()
            .filter(|deal| deal.deal_stage.is_open())
            .count()
    }
}

/// Input model for the add-player form. New players start as free agents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayer {
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
}

impl NewPlayer {
    pub fn validate(&self) -> Result<()> {
        validate_names(&self.first_name, &self.last_name)
    }
}

/// Input model for editing an existing player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    #[serde(default)]
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
}

impl PlayerUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        validate_names(&self.first_name, &self.last_name)
    }
}

pub(crate) fn validate_names(first_name: &str, last_name: &str) -> Result<()> {
    if first_name.trim().is_empty() {
        return Err(ValidationError::MissingField("first_name".to_string()).into());
    }
    if last_name.trim().is_empty() {
        return Err(ValidationError::MissingField("last_name".to_string()).into());
    }
    Ok(())
}

/// Trims optional free-text form fields, mapping blank input to `None`.
pub(crate) fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
