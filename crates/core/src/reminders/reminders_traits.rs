use async_trait::async_trait;

use super::reminders_model::{NewReminder, Reminder};
use crate::errors::Result;

#[async_trait]
pub trait ReminderRepositoryTrait: Send + Sync {
    /// All reminders, earliest due date first.
    async fn list(&self) -> Result<Vec<Reminder>>;

    /// Incomplete reminders, earliest due date first.
    async fn list_open(&self) -> Result<Vec<Reminder>>;

    /// Incomplete reminders linked to any of the given deals.
    async fn list_open_for_deals(&self, deal_ids: &[String]) -> Result<Vec<Reminder>>;

    async fn create(&self, new_reminder: NewReminder) -> Result<Reminder>;

    async fn set_completed(&self, reminder_id: &str, completed: bool) -> Result<Reminder>;

    async fn delete(&self, reminder_id: &str) -> Result<usize>;
}
