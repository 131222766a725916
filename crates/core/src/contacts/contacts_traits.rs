use async_trait::async_trait;

use super::contacts_model::{Contact, NewContact};
use crate::errors::Result;

#[async_trait]
pub trait ContactRepositoryTrait: Send + Sync {
    /// All contacts with team and player names, ordered by name.
    async fn list(&self) -> Result<Vec<Contact>>;

    async fn get_by_id(&self, contact_id: &str) -> Result<Contact>;

    async fn create(&self, new_contact: NewContact) -> Result<Contact>;

    async fn update(&self, contact_id: &str, changes: NewContact) -> Result<Contact>;

    async fn delete(&self, contact_id: &str) -> Result<usize>;
}
