//! Calendar classification of ISO dates.

use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

/// Error for a key that looks like a date but is not one (e.g. `2016-02-30`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("not a valid calendar date: {date:?}")]
pub struct InvalidDateError {
    /// The offending key.
    pub date: String,
}

/// Returns true iff the date falls on a Saturday or Sunday.
pub fn is_weekend(date: &str) -> Result<bool, InvalidDateError> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| InvalidDateError {
        date: date.to_string(),
    })?;
    Ok(matches!(parsed.weekday(), Weekday::Sat | Weekday::Sun))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturday_is_weekend() {
        assert!(is_weekend("2016-04-02").unwrap());
    }

    #[test]
    fn sunday_is_weekend() {
        assert!(is_weekend("2016-04-03").unwrap());
    }

    #[test]
    fn friday_is_not_weekend() {
        assert!(!is_weekend("2016-04-08").unwrap());
    }

    #[test]
    fn impossible_date_is_an_error() {
        let err = is_weekend("2016-02-30").unwrap_err();
        assert_eq!(err.date, "2016-02-30");
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(is_weekend("not-a-date").is_err());
    }
}
