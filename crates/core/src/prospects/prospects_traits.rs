use async_trait::async_trait;

use super::prospects_model::{NewProspect, Prospect};
use crate::errors::Result;

#[async_trait]
pub trait ProspectRepositoryTrait: Send + Sync {
    /// Prospects not yet converted, newest first.
    async fn list_open(&self) -> Result<Vec<Prospect>>;

    async fn get_by_id(&self, prospect_id: &str) -> Result<Prospect>;

    async fn create(&self, new_prospect: NewProspect) -> Result<Prospect>;

    /// Flags a prospect as converted and records the player it became.
    async fn mark_converted(&self, prospect_id: &str, player_id: &str) -> Result<Prospect>;
}
