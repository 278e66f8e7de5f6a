use chrono::{DateTime, Local, TimeZone, Utc};
use serde_json::Value;

use crate::config::TimeZoneMode;
use crate::parsers::deserializers::timestamp_from_value;

/// Shown when a message carries no usable timestamp
pub const INVALID_DATE: &str = "Invalid Date";

/// US-English date and time, e.g. "1/15/2024, 10:30:00 AM"
const US_DATE_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Format a raw timestamp field for a message's time label
pub fn format_date(value: Option<&Value>, zone: TimeZoneMode) -> String {
    match value.and_then(timestamp_from_value) {
        Some(timestamp) => match zone {
            TimeZoneMode::Local => format_in(&timestamp, &Local),
            TimeZoneMode::Utc => format_in(&timestamp, &Utc),
        },
        None => INVALID_DATE.to_string(),
    }
}

fn format_in<Tz: TimeZone>(timestamp: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(zone).format(US_DATE_TIME_FORMAT).to_string()
}
