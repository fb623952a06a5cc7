//! Boundary parsers turning user text into typed values
//!
//! Every failure is reported as `InvalidInput`; the core never sees raw text.

use crate::core::error::{RecordsError, Result};
use crate::core::models::{Weekday, WeeklySchedule};
use crate::core::report::ReportKind;
use chrono::NaiveDate;

/// Date format accepted for attendance
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
///
/// # Errors
/// Returns `InvalidInput` if the text is not a valid calendar date in that format
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| RecordsError::invalid(format!("invalid date '{s}' (expected YYYY-MM-DD): {e}")))
}

/// Parse a teaching day name
///
/// # Errors
/// Returns `InvalidInput` for anything but Monday..Friday (or a three-letter abbreviation)
pub fn parse_weekday(s: &str) -> Result<Weekday> {
    s.parse()
}

/// Parse a finite number
///
/// # Errors
/// Returns `InvalidInput` for malformed, infinite or NaN input
pub fn parse_number(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| RecordsError::invalid(format!("'{s}' is not a number")))
}

/// Parse a faculty performance rating between 0 and 5
///
/// # Errors
/// Returns `InvalidInput` if the text is not a number in range
pub fn parse_rating(s: &str) -> Result<f64> {
    let rating = parse_number(s)?;
    if (0.0..=5.0).contains(&rating) {
        Ok(rating)
    } else {
        Err(RecordsError::invalid(format!(
            "rating {rating} is outside 0-5"
        )))
    }
}

/// Parse an attendance flag: yes/no, y/n, present/absent, true/false
///
/// # Errors
/// Returns `InvalidInput` for any other word
pub fn parse_presence(s: &str) -> Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "present" | "true" => Ok(true),
        "no" | "n" | "absent" | "false" => Ok(false),
        _ => Err(RecordsError::invalid(format!(
            "'{s}' is not yes/no"
        ))),
    }
}

/// Parse a comma-separated list, dropping blank entries
#[must_use]
pub fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a weekly schedule written as `Day=Time` pairs separated by commas
///
/// `Monday=10:00,Wed=14:00` meets on Monday at 10:00 and Wednesday at 14:00.
/// An empty string or `none` is an empty schedule.
///
/// # Errors
/// Returns `InvalidInput` for a malformed pair, an unknown day, an empty time,
/// or a day listed twice
pub fn parse_schedule(s: &str) -> Result<WeeklySchedule> {
    let mut schedule = WeeklySchedule::new();
    if s.trim().eq_ignore_ascii_case("none") {
        return Ok(schedule);
    }

    for pair in parse_list(s) {
        let (day, time) = pair
            .split_once('=')
            .ok_or_else(|| RecordsError::invalid(format!("expected Day=Time, got '{pair}'")))?;
        let day = parse_weekday(day)?;
        let time = time.trim();
        if time.is_empty() {
            return Err(RecordsError::invalid(format!("missing time for {day}")));
        }
        if schedule.insert(day, time.to_string()).is_some() {
            return Err(RecordsError::invalid(format!(
                "{day} listed more than once; a course meets at most once per day"
            )));
        }
    }
    Ok(schedule)
}

/// Parse a report kind name
///
/// # Errors
/// Returns `InvalidInput` for an unknown report
pub fn parse_report_kind(s: &str) -> Result<ReportKind> {
    s.parse().map_err(RecordsError::InvalidInput)
}
