// Utility functions
use chrono::{NaiveDate, NaiveDateTime};

const INTRADAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a feed timestamp such as `2024-10-11 19:55:00`.
/// A bare date is taken as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, INTRADAY_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Volume in thousands, rounded, e.g. `1234567.0` -> `1235K`.
pub fn format_thousands(volume: f64) -> String {
    format!("{:.0}K", volume / 1000.0)
}
