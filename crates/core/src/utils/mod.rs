pub mod format;
pub mod time_utils;

pub use format::{days_ago_label, format_eur, initials, parse_lenient_decimal, preview};
pub use time_utils::{age_on, agency_today, days_between, days_in_month, Clock, AGENCY_TZ};
