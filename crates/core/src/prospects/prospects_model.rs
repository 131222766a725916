//! Prospect domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::players::NewPlayer;
use crate::Result;

/// A scouted athlete not yet under management.
///
/// Conversion never mutates a prospect into a player: a new player row is
/// inserted and the prospect is flagged with a back-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prospect {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_converted: bool,
    #[serde(default)]
    pub converted_player_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Prospect {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Player fields copied over on conversion.
    pub fn to_new_player(&self) -> NewPlayer {
        NewPlayer {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            date_of_birth: None,
            position: None,
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProspect {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewProspect {
    pub fn validate(&self) -> Result<()> {
        crate::players::validate_names(&self.first_name, &self.last_name)
    }
}
