//! Time helpers

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Format a server timestamp for operator prompts, e.g. `Friday 11 Aug 14:05`
///
/// Accepts RFC 3339 or `YYYY-MM-DD HH:MM:SS` (taken as local time). Anything
/// else is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    format_timestamp_in(raw, &Local)
}

/// [`format_timestamp`] in an explicit time zone
pub fn format_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    const FORMAT: &str = "%A %-d %b %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(tz).format(FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
            return dt.format(FORMAT).to_string();
        }
    }
    raw.to_string()
}
