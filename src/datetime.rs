//! Date/time helpers for database timestamps.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a timestamp stored by SQLite (`YYYY-MM-DD HH:MM:SS`, UTC) or RFC3339.
pub fn parse_db_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Convert a stored timestamp to RFC3339, returning the input unchanged if it
/// cannot be parsed.
pub fn to_rfc3339(value: &str) -> String {
    parse_db_datetime(value)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| value.to_string())
}
