use async_trait::async_trait;

use super::teams_model::{Competition, Team};
use crate::errors::Result;

/// Read-only access to the team and competition catalog.
#[async_trait]
pub trait CatalogRepositoryTrait: Send + Sync {
    /// All teams with their competition name, ordered by name.
    async fn list_teams(&self) -> Result<Vec<Team>>;

    /// All competitions ordered by name.
    async fn list_competitions(&self) -> Result<Vec<Competition>>;
}
