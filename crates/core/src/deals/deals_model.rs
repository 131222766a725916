//! Team deal and deal note models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::teams::Team;
use crate::{Error, Result};

/// Lifecycle position of one player-team negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    #[default]
    Ongoing,
    Sent,
    Signed,
    NotSigned,
}

impl DealStage {
    /// Board column order.
    pub const ALL: [DealStage; 4] = [
        DealStage::Ongoing,
        DealStage::Sent,
        DealStage::Signed,
        DealStage::NotSigned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DealStage::Ongoing => "ongoing",
            DealStage::Sent => "sent",
            DealStage::Signed => "signed",
            DealStage::NotSigned => "not_signed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DealStage::Ongoing => "Ongoing",
            DealStage::Sent => "Sent",
            DealStage::Signed => "Signed",
            DealStage::NotSigned => "Not Signed",
        }
    }

    /// No board move leads out of a terminal stage.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DealStage::Signed | DealStage::NotSigned)
    }

    /// Ongoing and sent deals count toward a player's active-deals badge.
    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for DealStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DealStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DealStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown deal stage '{}'",
                    s
                )))
            })
    }
}

/// Append-only note attached to a deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealNote {
    pub id: String,
    pub team_deal_id: String,
    pub note_text: String,
    #[serde(default)]
    pub deal_stage_at_time: Option<DealStage>,
    #[serde(default)]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One negotiation between a player and a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDeal {
    pub id: String,
    pub player_id: String,
    pub team_id: String,
    pub deal_stage: DealStage,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub team: Option<Team>,
    #[serde(default)]
    pub deal_notes: Vec<DealNote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeamDeal {
    pub fn team_name(&self) -> &str {
        self.team
            .as_ref()
            .map(|team| team.name.as_str())
            .unwrap_or("Unknown")
    }

    pub fn competition_id(&self) -> Option<&str> {
        self.team.as_ref().and_then(|team| team.competition_id.as_deref())
    }

    pub fn competition_name(&self) -> Option<&str> {
        self.team
            .as_ref()
            .and_then(|team| team.competition_name.as_deref())
    }

    /// Most recently written note.
    pub fn latest_note(&self) -> Option<&DealNote> {
        self.deal_notes.iter().max_by_key(|note| note.created_at)
    }
}

/// Deal summary embedded in player rows for the player board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealSummary {
    pub id: String,
    pub team_id: String,
    pub deal_stage: DealStage,
}

impl From<&TeamDeal> for DealSummary {
    fn from(deal: &TeamDeal) -> Self {
        Self {
            id: deal.id.clone(),
            team_id: deal.team_id.clone(),
            deal_stage: deal.deal_stage,
        }
    }
}

/// Input for opening a negotiation. New deals always start `ongoing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeamDeal {
    pub player_id: String,
    pub team_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl NewTeamDeal {
    pub fn validate(&self) -> Result<()> {
        if self.player_id.trim().is_empty() {
            return Err(ValidationError::MissingField("player_id".to_string()).into());
        }
        if self.team_id.trim().is_empty() {
            return Err(ValidationError::MissingField("team_id".to_string()).into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDealNote {
    pub team_deal_id: String,
    pub note_text: String,
    #[serde(default)]
    pub deal_stage_at_time: Option<DealStage>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl NewDealNote {
    pub fn validate(&self) -> Result<()> {
        if self.note_text.trim().is_empty() {
            return Err(ValidationError::InvalidInput("Please enter a note".to_string()).into());
        }
        Ok(())
    }
}
