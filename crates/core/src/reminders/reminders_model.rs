//! Reminder domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
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
    pub player_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Reminder form input. Reminders are always created open and user-authored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReminder {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub team_deal_id: Option<String>,
    #[serde(default)]
    pub contract_id: Option<String>,
}

impl NewReminder {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        Ok(())
    }

    pub(crate) fn cleaned(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: crate::players::clean_optional(self.description),
            tag: crate::players::clean_optional(self.tag),
            ..self
        }
    }
}
