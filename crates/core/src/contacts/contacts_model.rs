//! Contact domain models and list filters.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::Result;

/// Club staff, family members and other people around the players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
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
    pub team_name: Option<String>,
    #[serde(default)]
    pub player_name: Option<String>,
}

impl Contact {
    /// Player-linked contacts are synced from the player record and read-only.
    pub fn is_auto_synced(&self) -> bool {
        self.player_id.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
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
    pub notes: Option<String>,
}

impl NewContact {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        Ok(())
    }

    pub(crate) fn cleaned(self) -> Self {
        use crate::players::clean_optional;
        Self {
            name: self.name.trim().to_string(),
            role: clean_optional(self.role),
            email: clean_optional(self.email),
            phone: clean_optional(self.phone),
            team_id: clean_optional(self.team_id),
            notes: clean_optional(self.notes),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
}

impl ContactFilter {
    /// Name and email match case-insensitively, phone as a raw substring.
    pub fn matches(&self, contact: &Contact) -> bool {
        let search = self.search.as_deref().map(str::trim).unwrap_or_default();
        let needle = search.to_lowercase();
        let search_hit = search.is_empty()
            || contact.name.to_lowercase().contains(&needle)
            || contact
                .email
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(&needle))
            || contact
                .phone
                .as_deref()
                .is_some_and(|phone| phone.contains(search));

        let role_hit = self
            .role
            .as_deref()
            .filter(|r| !r.is_empty())
            .map_or(true, |role| contact.role.as_deref() == Some(role));
        let team_hit = self
            .team_id
            .as_deref()
            .filter(|t| !t.is_empty())
            .map_or(true, |team| contact.team_id.as_deref() == Some(team));

        search_hit && role_hit && team_hit
    }
}
