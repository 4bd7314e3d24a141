//! Textual timestamp format used by the `payment` table
//!
//! Both timestamp columns hold ISO-8601 date-times with a numeric offset and
//! second precision, e.g. `2024-03-01T10:15:30+0000`.

use chrono::{DateTime, ParseError, Utc};

/// chrono format string for the timestamp columns
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Render a timestamp for binding into an insert.
///
/// Sub-second precision is dropped.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp; any offset is accepted and normalised to UTC.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_str(text, TIMESTAMP_FORMAT).map(|dt| dt.with_timezone(&Utc))
}
