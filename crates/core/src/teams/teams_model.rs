//! Team and competition catalog models.

use serde::{Deserialize, Serialize};

/// A club that deals can be negotiated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub competition_id: Option<String>,
    /// Denormalized from the competition join.
    #[serde(default)]
    pub competition_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// Teams whose name contains `search`, case-insensitively. Empty search matches all.
pub fn search_teams<'a>(teams: &'a [Team], search: &str) -> Vec<&'a Team> {
    let needle = search.trim().to_lowercase();
    teams
        .iter()
        .filter(|team| needle.is_empty() || team.name.to_lowercase().contains(&needle))
        .collect()
}
