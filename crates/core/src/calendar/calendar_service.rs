use log::debug;
use std::sync::Arc;

use super::calendar_ical::generate_ical;
use super::calendar_subscription::{export_filename, subscription, CalendarExport, CalendarSubscription};
use crate::errors::Result;
use crate::reminders::ReminderRepositoryTrait;
use crate::utils::Clock;

/// Exports open reminders as iCalendar, for download or as a live feed.
pub struct CalendarService {
    reminders: Arc<dyn ReminderRepositoryTrait>,
    clock: Clock,
}

impl CalendarService {
    pub fn new(reminders: Arc<dyn ReminderRepositoryTrait>) -> Self {
        Self {
            reminders,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Calendar document for the open reminders.
    pub async fn feed(&self) -> Result<String> {
        let reminders = self.reminders.list_open().await?;
        debug!("Generating calendar feed for {} open reminders", reminders.len());
        Ok(generate_ical(&reminders, self.clock.now()))
    }

    pub async fn export(&self) -> Result<CalendarExport> {
        Ok(CalendarExport {
            filename: export_filename(self.clock.today()),
            content: self.feed().await?,
        })
    }

    pub fn subscription(&self, public_url: &str, token: &str) -> Result<CalendarSubscription> {
        subscription(public_url, token)
    }
}
