//! Reminders module - dated to-dos, the calendar month grid and upcoming list.

mod reminders_calendar;
mod reminders_model;
mod reminders_service;
mod reminders_traits;

#[cfg(test)]
mod reminders_service_tests;

pub use reminders_calendar::{
    due_label, month_grid, upcoming, DayCell, MonthGrid, ReminderChip, UpcomingReminder,
};
pub use reminders_model::{NewReminder, Reminder};
pub use reminders_service::ReminderService;
pub use reminders_traits::ReminderRepositoryTrait;
