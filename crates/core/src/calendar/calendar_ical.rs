//! iCalendar (RFC 5545) export of reminders, plus a reader for the subset we write.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::reminders::Reminder;

pub const PRODUCT_ID: &str = "-//AgentPlay//Agent Platform Calendar//IT";
pub const CALENDAR_NAME: &str = "AgentPlay Reminders";
pub const CALENDAR_DESCRIPTION: &str = "Basketball agent reminders";
pub const CALENDAR_TIMEZONE: &str = "Europe/Rome";
pub const UID_DOMAIN: &str = "agentplay.app";

const MAX_LINE_OCTETS: usize = 75;
const DATE_FORMAT: &str = "%Y%m%d";
const STAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// One all-day event read back from a calendar document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub uid: String,
    pub summary: String,
    pub description: Option<String>,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl CalendarEvent {
    /// Reminder id encoded in the UID.
    pub fn reminder_id(&self) -> &str {
        self.uid
            .strip_suffix(UID_DOMAIN)
            .and_then(|rest| rest.strip_suffix('@'))
            .unwrap_or(&self.uid)
    }
}

/// Escapes a TEXT value. Line breaks of any flavour become `\n`.
pub fn escape_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut escaped = String::with_capacity(normalized.len());
    for c in normalized.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn unescape_text(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => unescaped.push('\n'),
            Some(next @ ('\\' | ';' | ',')) => unescaped.push(next),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

/// Appends `line` to `out`, folded so no physical line exceeds 75 octets.
/// Splits only on char boundaries; continuation lines start with a space.
fn push_folded(out: &mut String, line: &str) {
    let mut rest = line;
    let mut limit = MAX_LINE_OCTETS;
    let mut first = true;
    loop {
        if !first {
            out.push(' ');
        }
        if rest.len() <= limit {
            out.push_str(rest);
            out.push_str("\r\n");
            return;
        }
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        out.push_str(&rest[..cut]);
        out.push_str("\r\n");
        rest = &rest[cut..];
        // The leading space counts against the next line.
        limit = MAX_LINE_OCTETS - 1;
        first = false;
    }
}

/// Builds the calendar document. Reminders without a due date are skipped.
pub fn generate_ical(reminders: &[Reminder], now: DateTime<Utc>) -> String {
    let stamp = now.format(STAMP_FORMAT).to_string();
    let mut out = String::new();
    let header = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODUCT_ID),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        format!("X-WR-CALNAME:{}", CALENDAR_NAME),
        format!("X-WR-CALDESC:{}", CALENDAR_DESCRIPTION),
        format!("X-WR-TIMEZONE:{}", CALENDAR_TIMEZONE),
    ];
    for line in &header {
        push_folded(&mut out, line);
    }

    for reminder in reminders {
        let Some(due_date) = reminder.due_date else {
            continue;
        };
        let date = due_date.format(DATE_FORMAT).to_string();
        push_folded(&mut out, "BEGIN:VEVENT");
        push_folded(&mut out, &format!("UID:{}@{}", reminder.id, UID_DOMAIN));
        push_folded(&mut out, &format!("DTSTART;VALUE=DATE:{}", date));
        push_folded(&mut out, &format!("DTEND;VALUE=DATE:{}", date));
        push_folded(&mut out, &format!("DTSTAMP:{}", stamp));
        push_folded(&mut out, &format!("SUMMARY:{}", escape_text(&reminder.title)));
        if let Some(description) = reminder.description.as_deref().filter(|d| !d.is_empty()) {
            push_folded(&mut out, &format!("DESCRIPTION:{}", escape_text(description)));
        }
        push_folded(&mut out, "END:VEVENT");
    }

    push_folded(&mut out, "END:VCALENDAR");
    out
}

fn unfold(document: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in document.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(continuation) = raw.strip_prefix([' ', '\t']) {
            if let Some(last) = lines.last_mut() {
                last.push_str(continuation);
                continue;
            }
        }
        if !raw.is_empty() {
            lines.push(raw.to_string());
        }
    }
    lines
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        ValidationError::InvalidInput(format!("Invalid calendar date '{}': {}", value, e)).into()
    })
}

#[derive(Default)]
struct PartialEvent {
    uid: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl PartialEvent {
    fn finish(self) -> Result<CalendarEvent> {
        let missing = |field: &str| ValidationError::MissingField(format!("VEVENT {}", field));
        Ok(CalendarEvent {
            uid: self.uid.ok_or_else(|| missing("UID"))?,
            summary: self.summary.unwrap_or_default(),
            description: self.description,
            start: self.start.ok_or_else(|| missing("DTSTART"))?,
            end: self.end,
        })
    }
}

/// Reads the events of a calendar document. Unknown properties are ignored.
pub fn parse_ical(document: &str) -> Result<Vec<CalendarEvent>> {
    let mut events = Vec::new();
    let mut current: Option<PartialEvent> = None;

    for line in unfold(document) {
        let Some((head, value)) = line.split_once(':') else {
            continue;
        };
        let name = head.split(';').next().unwrap_or(head).to_ascii_uppercase();
        let is_event_marker = value.eq_ignore_ascii_case("VEVENT");
        match name.as_str() {
            "BEGIN" if is_event_marker => current = Some(PartialEvent::default()),
            "END" if is_event_marker => {
                if let Some(event) = current.take() {
                    events.push(event.finish()?);
                }
            }
            property => {
                let Some(event) = current.as_mut() else {
                    continue;
                };
                match property {
                    "UID" => event.uid = Some(value.to_string()),
                    "SUMMARY" => event.summary = Some(unescape_text(value)),
                    "DESCRIPTION" => event.description = Some(unescape_text(value)),
                    "DTSTART" => event.start = Some(parse_date(value)?),
                    "DTEND" => event.end = Some(parse_date(value)?),
                    _ => {}
                }
            }
        }
    }

    Ok(events)
}
