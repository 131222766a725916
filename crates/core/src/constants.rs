use serde::{Deserialize, Serialize};

/// Timezone used for "today" and for calendar exports.
pub const AGENCY_TIMEZONE: &str = "Europe/Rome";

/// Minimum password length accepted by the sign-up form.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Characters of the latest deal note shown on a deal card.
pub const NOTE_PREVIEW_CHARS: usize = 50;

/// Reminder chips shown in one calendar day cell before collapsing into "+N more".
pub const MAX_REMINDERS_PER_DAY: usize = 3;

/// Length of the upcoming reminders list.
pub const UPCOMING_REMINDERS_LIMIT: usize = 10;

/// Tag preset for reminders created from the deal pipeline.
pub const DEAL_REMINDER_TAG: &str = "deal";

/// Tables exposed by the hosted data backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Players,
    Prospects,
    Contracts,
    Payments,
    TeamDeals,
    DealNotes,
    Reminders,
    Contacts,
    Teams,
    Competitions,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Players => "players",
            Table::Prospects => "prospects",
            Table::Contracts => "contracts",
            Table::Payments => "payments",
            Table::TeamDeals => "team_deals",
            Table::DealNotes => "deal_notes",
            Table::Reminders => "reminders",
            Table::Contacts => "contacts",
            Table::Teams => "teams",
            Table::Competitions => "competitions",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
