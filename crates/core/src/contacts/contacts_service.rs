use log::debug;
use std::sync::Arc;

use super::contacts_model::{Contact, ContactFilter, NewContact};
use super::contacts_traits::ContactRepositoryTrait;
use crate::errors::{Result, ValidationError};
use crate::refresh::{Collection, Mutation, RefreshSet};

/// Service behind the contacts page.
pub struct ContactService {
    repository: Arc<dyn ContactRepositoryTrait>,
}

impl ContactService {
    pub fn new(repository: Arc<dyn ContactRepositoryTrait>) -> Self {
        Self { repository }
    }

    pub async fn list_contacts(&self, filter: &ContactFilter) -> Result<Vec<Contact>> {
        let contacts = self.repository.list().await?;
        Ok(contacts.into_iter().filter(|c| filter.matches(c)).collect())
    }

    pub async fn create_contact(&self, new_contact: NewContact) -> Result<Mutation<Contact>> {
        new_contact.validate()?;
        let contact = self.repository.create(new_contact.cleaned()).await?;
        debug!("Created contact {}", contact.id);
        Ok(Mutation::new(contact, RefreshSet::of([Collection::Contacts])))
    }

    pub async fn update_contact(
        &self,
        contact_id: &str,
        changes: NewContact,
    ) -> Result<Mutation<Contact>> {
        changes.validate()?;
        self.ensure_editable(contact_id).await?;
        let contact = self.repository.update(contact_id, changes.cleaned()).await?;
        Ok(Mutation::new(contact, RefreshSet::of([Collection::Contacts])))
    }

    pub async fn delete_contact(&self, contact_id: &str) -> Result<Mutation<()>> {
        self.ensure_editable(contact_id).await?;
        self.repository.delete(contact_id).await?;
        Ok(Mutation::new((), RefreshSet::of([Collection::Contacts])))
    }

    async fn ensure_editable(&self, contact_id: &str) -> Result<()> {
        let existing = self.repository.get_by_id(contact_id).await?;
        if existing.is_auto_synced() {
            return Err(ValidationError::InvalidInput(format!(
                "{} is synced from a player record and cannot be edited here",
                existing.name
            ))
            .into());
        }
        Ok(())
    }
}
