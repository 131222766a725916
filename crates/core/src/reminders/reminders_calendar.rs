//! Calendar page views: the month grid, the upcoming list and due labels.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::reminders_model::Reminder;
use crate::constants::{MAX_REMINDERS_PER_DAY, UPCOMING_REMINDERS_LIMIT};
use crate::errors::ValidationError;
use crate::utils::{days_between, days_in_month};
use crate::Result;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// "Overdue N days", "Due today", "Due tomorrow" or "Due in N days".
pub fn due_label(due_date: NaiveDate, today: NaiveDate) -> String {
    match days_between(today, due_date) {
        d if d < 0 => format!("Overdue {} days", -d),
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d => format!("Due in {} days", d),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderChip {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub is_today: bool,
    pub reminders: Vec<ReminderChip>,
    /// Reminders beyond the chips shown.
    pub more: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub label: String,
    /// Empty cells before day 1 in a Monday-first week.
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

/// Builds the Monday-first month grid for `year`/`month`.
pub fn month_grid(reminders: &[Reminder], year: i32, month: u32, today: NaiveDate) -> Result<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ValidationError::InvalidInput(format!("Invalid month {}-{}", year, month))
    })?;
    let day_count = days_in_month(year, month).unwrap_or(0);

    let days = (1..=day_count)
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| {
            let due: Vec<&Reminder> = reminders
                .iter()
                .filter(|r| r.due_date == Some(date))
                .collect();
            DayCell {
                day: date.day(),
                date,
                is_today: date == today,
                reminders: due
                    .iter()
                    .take(MAX_REMINDERS_PER_DAY)
                    .map(|r| ReminderChip {
                        id: r.id.clone(),
                        title: r.title.clone(),
                        completed: r.completed,
                    })
                    .collect(),
                more: due.len().saturating_sub(MAX_REMINDERS_PER_DAY),
            }
        })
        .collect();

    Ok(MonthGrid {
        year,
        month,
        label: format!("{} {}", MONTH_NAMES[(month - 1) as usize], year),
        leading_blanks: first.weekday().num_days_from_monday(),
        days,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingReminder {
    pub reminder: Reminder,
    pub due_label: String,
}

/// Open reminders due today or later, in due order, capped.
pub fn upcoming(reminders: &[Reminder], today: NaiveDate) -> Vec<UpcomingReminder> {
    let mut open: Vec<&Reminder> = reminders
        .iter()
        .filter(|r| !r.completed && r.due_date.is_some_and(|d| d >= today))
        .collect();
    open.sort_by_key(|r| r.due_date);
    open.into_iter()
        .take(UPCOMING_REMINDERS_LIMIT)
        .map(|r| UpcomingReminder {
            due_label: r
                .due_date
                .map(|d| due_label(d, today))
                .unwrap_or_default(),
            reminder: r.clone(),
        })
        .collect()
}
