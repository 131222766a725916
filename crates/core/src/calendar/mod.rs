//! Calendar module - iCalendar export and the live subscription feed.

mod calendar_ical;
mod calendar_service;
mod calendar_subscription;

#[cfg(test)]
mod calendar_ical_tests;

pub use calendar_ical::{
    escape_text, generate_ical, parse_ical, unescape_text, CalendarEvent, CALENDAR_DESCRIPTION,
    CALENDAR_NAME, CALENDAR_TIMEZONE, PRODUCT_ID, UID_DOMAIN,
};
pub use calendar_service::CalendarService;
pub use calendar_subscription::{
    export_filename, feed_url, subscription, webcal_url, CalendarExport, CalendarSubscription,
    FEED_PATH,
};
