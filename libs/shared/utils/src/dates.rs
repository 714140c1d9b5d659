//! Canonical string forms for calendar dates and times of day.
//!
//! Records keep dates and hours as strings, so two spellings of the same
//! slot must collapse to one value before they are compared or stored.

use chrono::{NaiveDate, NaiveTime};

const DATE_INPUT_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
const HOUR_INPUT_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const HOUR_FORMAT: &str = "%H:%M";

/// Accepts `YYYY-MM-DD` or `DD/MM/YYYY` and returns `YYYY-MM-DD`.
pub fn normalize_date(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(|date| date.format(DATE_FORMAT).to_string())
        .ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD or DD/MM/YYYY", raw))
}

/// Accepts `HH:MM` or `HH:MM:SS` (24-hour clock) and returns `HH:MM`.
pub fn normalize_hour(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    HOUR_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .map(|time| time.format(HOUR_FORMAT).to_string())
        .ok_or_else(|| format!("invalid hour '{}', expected HH:MM", raw))
}
