use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{Result, ValidationError};

pub const FEED_PATH: &str = "/api/v1/calendar/feed";

/// Live-feed URLs handed to calendar applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSubscription {
    pub feed_url: String,
    pub webcal_url: String,
}

/// A calendar document ready for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarExport {
    pub filename: String,
    pub content: String,
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("agentplay-reminders-{}.ics", date.format("%Y-%m-%d"))
}

pub fn feed_url(public_url: &str, token: &str) -> Result<String> {
    let base = public_url.trim().trim_end_matches('/');
    let parsed = Url::parse(base)
        .map_err(|e| ValidationError::InvalidInput(format!("Invalid public URL '{}': {}", base, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidInput(format!(
            "Public URL must use http or https: {}",
            base
        ))
        .into());
    }
    Ok(format!(
        "{}{}?token={}",
        base,
        FEED_PATH,
        urlencoding::encode(token)
    ))
}

/// Swaps the http(s) scheme for `webcal://`.
pub fn webcal_url(feed_url: &str) -> String {
    if let Some(rest) = feed_url.strip_prefix("https://") {
        format!("webcal://{}", rest)
    } else if let Some(rest) = feed_url.strip_prefix("http://") {
        format!("webcal://{}", rest)
    } else {
        feed_url.to_string()
    }
}

pub fn subscription(public_url: &str, token: &str) -> Result<CalendarSubscription> {
    let feed_url = feed_url(public_url, token)?;
    Ok(CalendarSubscription {
        webcal_url: webcal_url(&feed_url),
        feed_url,
    })
}
