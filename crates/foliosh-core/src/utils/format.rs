//! Date formatting for command output.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Short date used in blog listings, e.g. `3/14/2024`.
pub fn short_date(at: &DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

/// Long local timestamp printed by `date`.
pub fn long_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%a %b %d %Y %H:%M:%S GMT%z").to_string()
}

/// Current local time as printed by `date`.
pub fn now_timestamp() -> String {
    long_timestamp(&Local::now())
}
