//! Text encoding for wall-clock timestamps.
//!
//! Timestamps are stored and served as `YYYY-MM-DD HH:MM:SS`, the same shape
//! SQLite's `CURRENT_TIMESTAMP` produces, so `date(created_at)` works in SQL.

use chrono::NaiveDateTime;
use serde::Serializer;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}

/// `serialize_with` adapter for timestamp fields.
pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(value))
}

/// `serialize_with` adapter for nullable timestamp fields.
pub fn serialize_option<S: Serializer>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.serialize_str(&format_timestamp(value)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, parse_timestamp};

    #[test]
    fn parses_what_it_formats() {
        let parsed = parse_timestamp("2024-03-04 07:05:09").expect("valid timestamp");
        assert_eq!(format_timestamp(&parsed), "2024-03-04 07:05:09");
    }

    #[test]
    fn rejects_iso_t_separator() {
        assert!(parse_timestamp("2024-03-04T07:05:09").is_none());
    }
}
