//! Reminders and contacts.

use async_trait::async_trait;
use serde_json::json;

use agentplay_core::constants::Table;
use agentplay_core::contacts::{Contact, ContactRepositoryTrait, NewContact};
use agentplay_core::errors::Result;
use agentplay_core::reminders::{NewReminder, Reminder, ReminderRepositoryTrait};

use super::RemoteRepository;
use crate::query::Query;
use crate::rows::{into_models, ContactRow, ReminderRow, CONTACT_SELECT, REMINDER_SELECT};

fn reminders_by_due_date() -> Query {
    Query::new()
        .select(REMINDER_SELECT)
        .order_asc_nulls_last("due_date")
}

#[async_trait]
impl ReminderRepositoryTrait for RemoteRepository {
    async fn list(&self) -> Result<Vec<Reminder>> {
        let rows: Vec<ReminderRow> = self
            .rest
            .select(Table::Reminders, &reminders_by_due_date())
            .await?;
        Ok(into_models(rows))
    }

    async fn list_open(&self) -> Result<Vec<Reminder>> {
        let query = reminders_by_due_date().eq("completed", false);
        let rows: Vec<ReminderRow> = self.rest.select(Table::Reminders, &query).await?;
        Ok(into_models(rows))
    }

    async fn list_open_for_deals(&self, deal_ids: &[String]) -> Result<Vec<Reminder>> {
        if deal_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = reminders_by_due_date()
            .in_list("team_deal_id", deal_ids)
            .eq("completed", false);
        let rows: Vec<ReminderRow> = self.rest.select(Table::Reminders, &query).await?;
        Ok(into_models(rows))
    }

    async fn create(&self, new_reminder: NewReminder) -> Result<Reminder> {
        let row: ReminderRow = self
            .rest
            .insert(Table::Reminders, &new_reminder, &Query::new().select(REMINDER_SELECT))
            .await?;
        Ok(row.into())
    }

    async fn set_completed(&self, reminder_id: &str, completed: bool) -> Result<Reminder> {
        let query = Query::new().select(REMINDER_SELECT).eq("id", reminder_id);
        let row: ReminderRow = self
            .rest
            .update(Table::Reminders, &query, &json!({ "completed": completed }))
            .await?;
        Ok(row.into())
    }

    async fn delete(&self, reminder_id: &str) -> Result<usize> {
        self.rest
            .delete(Table::Reminders, &Query::new().eq("id", reminder_id))
            .await
    }
}

#[async_trait]
impl ContactRepositoryTrait for RemoteRepository {
    async fn list(&self) -> Result<Vec<Contact>> {
        let query = Query::new().select(CONTACT_SELECT).order("name", true);
        let rows: Vec<ContactRow> = self.rest.select(Table::Contacts, &query).await?;
        Ok(into_models(rows))
    }

    async fn get_by_id(&self, contact_id: &str) -> Result<Contact> {
        let query = Query::new().select(CONTACT_SELECT).eq("id", contact_id);
        let row: ContactRow = self.rest.select_single(Table::Contacts, &query).await?;
        Ok(row.into())
    }

    async fn create(&self, new_contact: NewContact) -> Result<Contact> {
        let mut body = serde_json::to_value(&new_contact)?;
        if let Some(fields) = body.as_object_mut() {
            fields.insert("user_id".to_string(), json!(self.user_id));
        }
        let row: ContactRow = self
            .rest
            .insert(Table::Contacts, &body, &Query::new().select(CONTACT_SELECT))
            .await?;
        Ok(row.into())
    }

    async fn update(&self, contact_id: &str, changes: NewContact) -> Result<Contact> {
        let query = Query::new().select(CONTACT_SELECT).eq("id", contact_id);
        let row: ContactRow = self.rest.update(Table::Contacts, &query, &changes).await?;
        Ok(row.into())
    }

    async fn delete(&self, contact_id: &str) -> Result<usize> {
        self.rest
            .delete(Table::Contacts, &Query::new().eq("id", contact_id))
            .await
    }
}
