//! Date parsing and formatting at the edges of the planner.
//!
//! The core works on [`NaiveDate`] only. Inputs may carry a time component
//! (e.g. `2018-02-23T09:00:00.000Z`); it is dropped, which is the
//! start-of-day normalization every calendar computation assumes.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ScheduleError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO calendar date, an RFC 3339 timestamp or a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp into a calendar date.
///
/// `field` names the input in the returned error.
pub fn parse_date_field(field: &'static str, value: &str) -> Result<NaiveDate, ScheduleError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(timestamp.date());
        }
    }
    Err(ScheduleError::invalid_date(field, value))
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ScheduleError> {
    parse_date_field("date", value)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
