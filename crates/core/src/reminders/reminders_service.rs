use log::debug;
use std::sync::Arc;

use super::reminders_calendar::{month_grid, upcoming, MonthGrid, UpcomingReminder};
use super::reminders_model::{NewReminder, Reminder};
use super::reminders_traits::ReminderRepositoryTrait;
use crate::errors::Result;
use crate::refresh::{Collection, Mutation, RefreshSet};
use crate::utils::Clock;

/// Service behind the calendar page and the standalone reminder forms.
pub struct ReminderService {
    repository: Arc<dyn ReminderRepositoryTrait>,
    clock: Clock,
}

impl ReminderService {
    pub fn new(repository: Arc<dyn ReminderRepositoryTrait>) -> Self {
        Self {
            repository,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub async fn list_reminders(&self) -> Result<Vec<Reminder>> {
        self.repository.list().await
    }

    pub async fn month(&self, year: i32, month: u32) -> Result<MonthGrid> {
        let reminders = self.repository.list().await?;
        month_grid(&reminders, year, month, self.clock.today())
    }

    pub async fn upcoming(&self) -> Result<Vec<UpcomingReminder>> {
        let reminders = self.repository.list().await?;
        Ok(upcoming(&reminders, self.clock.today()))
    }

    pub async fn create_reminder(&self, new_reminder: NewReminder) -> Result<Mutation<Reminder>> {
        new_reminder.validate()?;
        debug!("Creating reminder '{}'", new_reminder.title);
        let reminder = self.repository.create(new_reminder.cleaned()).await?;
        Ok(Mutation::new(reminder, Self::refresh()))
    }

    pub async fn set_completed(&self, reminder_id: &str, completed: bool) -> Result<Mutation<Reminder>> {
        let reminder = self.repository.set_completed(reminder_id, completed).await?;
        Ok(Mutation::new(reminder, Self::refresh()))
    }

    pub async fn delete_reminder(&self, reminder_id: &str) -> Result<Mutation<()>> {
        self.repository.delete(reminder_id).await?;
        Ok(Mutation::new((), Self::refresh()))
    }

    fn refresh() -> RefreshSet {
        RefreshSet::of([Collection::Reminders, Collection::DealReminders])
    }
}
