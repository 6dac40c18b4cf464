//! Calendar-date boundary helpers.
//!
//! # Responsibility
//! - Parse and format `YYYY-MM-DD` dates at storage/CLI boundaries.
//! - Provide the local "today" used by date-based views.
//!
//! # Invariants
//! - Only zero-padded ISO-8601 calendar dates are accepted, so the typed
//!   ordering matches the lexicographic ordering of the string form.

use chrono::{Local, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const ISO_DATE_LEN: usize = 10;

/// Rejected date input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    pub input: String,
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date `{}`; expected YYYY-MM-DD", self.input)
    }
}

impl Error for DateParseError {}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Non-padded forms such as `2024-9-5` are rejected even though chrono would
/// accept them.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = value.trim();
    let reject = || DateParseError {
        input: value.to_string(),
    };

    if trimmed.len() != ISO_DATE_LEN {
        return Err(reject());
    }

    let date = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).map_err(|_| reject())?;
    if format_iso_date(date) != trimmed {
        return Err(reject());
    }
    Ok(date)
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Returns today's date on the local system clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::{format_iso_date, parse_iso_date};
    use chrono::NaiveDate;

    #[test]
    fn parses_padded_dates() {
        let date = parse_iso_date("2024-09-05").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 9, 5).unwrap());
        assert_eq!(format_iso_date(date), "2024-09-05");
    }

    #[test]
    fn rejects_unpadded_and_garbage_dates() {
        assert!(parse_iso_date("2024-9-5").is_err());
        assert!(parse_iso_date("2024-02-30").is_err());
        assert!(parse_iso_date("tomorrow").is_err());
        assert!(parse_iso_date("").is_err());
    }

    #[test]
    fn typed_order_matches_string_order() {
        let earlier = parse_iso_date("2024-09-25").unwrap();
        let later = parse_iso_date("2024-10-01").unwrap();
        assert!(earlier < later);
        assert!(format_iso_date(earlier) < format_iso_date(later));
    }
}
