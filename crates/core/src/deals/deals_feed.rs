//! Notes and reminders of the open player, interleaved in one timeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::deals_model::{DealStage, TeamDeal};
use crate::reminders::{due_label, Reminder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedItem {
    Note {
        id: String,
        team_deal_id: String,
        team_id: String,
        team_name: String,
        text: String,
        stage_at_time: Option<DealStage>,
        created_at: DateTime<Utc>,
    },
    Reminder {
        id: String,
        team_deal_id: Option<String>,
        team_id: Option<String>,
        team_name: String,
        title: String,
        description: Option<String>,
        due_date: Option<NaiveDate>,
        due_label: Option<String>,
        completed: bool,
        created_at: Option<DateTime<Utc>>,
    },
}

impl FeedItem {
    /// Creation time, falling back to the due date for reminders.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FeedItem::Note { created_at, .. } => Some(*created_at),
            FeedItem::Reminder {
                created_at,
                due_date,
                ..
            } => created_at.or_else(|| {
                due_date
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc())
            }),
        }
    }

    pub fn team_id(&self) -> Option<&str> {
        match self {
            FeedItem::Note { team_id, .. } => Some(team_id.as_str()),
            FeedItem::Reminder { team_id, .. } => team_id.as_deref(),
        }
    }
}

/// Newest first. `team_filter` keeps only items of that team's deal.
pub fn build_feed(
    deals: &[TeamDeal],
    reminders: &[Reminder],
    team_filter: Option<&str>,
    today: NaiveDate,
) -> Vec<FeedItem> {
    let notes = deals.iter().flat_map(|deal| {
        deal.deal_notes.iter().map(move |note| FeedItem::Note {
            id: note.id.clone(),
            team_deal_id: deal.id.clone(),
            team_id: deal.team_id.clone(),
            team_name: deal.team_name().to_string(),
            text: note.note_text.clone(),
            stage_at_time: note.deal_stage_at_time,
            created_at: note.created_at,
        })
    });

    let reminder_items = reminders.iter().map(|reminder| {
        let deal = reminder
            .team_deal_id
            .as_deref()
            .and_then(|id| deals.iter().find(|d| d.id == id));
        FeedItem::Reminder {
            id: reminder.id.clone(),
            team_deal_id: reminder.team_deal_id.clone(),
            team_id: deal.map(|d| d.team_id.clone()),
            team_name: deal
                .map(|d| d.team_name().to_string())
                .unwrap_or_else(|| "General".to_string()),
            title: reminder.title.clone(),
            description: reminder.description.clone(),
            due_date: reminder.due_date,
            due_label: reminder.due_date.map(|d| due_label(d, today)),
            completed: reminder.completed,
            created_at: reminder.created_at,
        }
    });

    let mut items: Vec<FeedItem> = notes
        .chain(reminder_items)
        .filter(|item| team_filter.map_or(true, |team| item.team_id() == Some(team)))
        .collect();
    // `None` sorts below any timestamp, so undated items end up last.
    items.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    items
}
