//! Conversion between human-readable durations and seconds.
//!
//! The work-log grammar accepts `"2h 30m"`, `"45m"`, `"8h"`, and bare `"8"`
//! (hours). Formatting is one-directional: sub-minute remainders are
//! truncated, so `format_duration(parse_duration(s))` only round-trips to
//! the minute.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static HOURS_MINUTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)h +(\d+)m$").unwrap());
static MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)m$").unwrap());
static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)h?$").unwrap());

/// Error for a duration string matching none of the accepted forms, or one
/// whose value does not fit in seconds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized duration: {text:?}")]
pub struct DurationParseError {
    /// The offending input.
    pub text: String,
}

impl DurationParseError {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

/// Parses a duration string into seconds.
///
/// Forms are tried in priority order: `"<h>h <m>m"`, `"<m>m"`, `"<h>h"`,
/// then bare `"<h>"` (trailing `h` optional).
pub fn parse_duration(text: &str) -> Result<u64, DurationParseError> {
    if let Some(caps) = HOURS_MINUTES_RE.captures(text) {
        let hours = parse_number(&caps[1], text)?;
        let minutes = parse_number(&caps[2], text)?;
        return hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes.checked_mul(60)?))
            .ok_or_else(|| DurationParseError::new(text));
    }
    if let Some(caps) = MINUTES_RE.captures(text) {
        let minutes = parse_number(&caps[1], text)?;
        return minutes
            .checked_mul(60)
            .ok_or_else(|| DurationParseError::new(text));
    }
    if let Some(caps) = HOURS_RE.captures(text) {
        let hours = parse_number(&caps[1], text)?;
        return hours
            .checked_mul(3600)
            .ok_or_else(|| DurationParseError::new(text));
    }
    Err(DurationParseError::new(text))
}

/// Formats seconds as `"<H>h <M>m"`, truncating any sub-minute remainder.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    format!("{}h {}m", seconds / 3600, seconds / 60 % 60)
}

fn parse_number(digits: &str, text: &str) -> Result<u64, DurationParseError> {
    // The regexes only capture digits, so this can only fail on overflow.
    digits.parse().map_err(|_| DurationParseError::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hours_and_minutes() {
        assert_eq!(parse_duration("2h 2m").unwrap(), 7320);
        assert_eq!(parse_duration("3429h 21m").unwrap(), 12_345_660);
    }

    #[test]
    fn parses_hours_and_minutes_with_extra_spaces() {
        assert_eq!(parse_duration("1h  30m").unwrap(), 5400);
    }

    #[test]
    fn parses_minutes() {
        assert_eq!(parse_duration("30m").unwrap(), 1800);
    }

    #[test]
    fn parses_hours() {
        assert_eq!(parse_duration("8h").unwrap(), 28_800);
    }

    #[test]
    fn parses_bare_number_as_hours() {
        assert_eq!(parse_duration("8").unwrap(), 28_800);
    }

    #[test]
    fn rejects_unrecognized_forms() {
        for bad in ["8.5", "8 3m", "m", "", "1h30m", "-2h", "eight"] {
            let err = parse_duration(bad).unwrap_err();
            assert_eq!(err.text, bad, "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn rejects_values_that_overflow_seconds() {
        assert!(parse_duration("99999999999999999999h").is_err());
    }

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_duration(7320), "2h 2m");
        assert_eq!(format_duration(28_800), "8h 0m");
        assert_eq!(format_duration(1800), "0h 30m");
        assert_eq!(format_duration(12_345_660), "3429h 21m");
    }

    #[test]
    fn formatting_truncates_to_the_minute() {
        assert_eq!(format_duration(131), "0h 2m");
        // Lossy by design: not a round trip back to the original seconds.
        assert_eq!(parse_duration(&format_duration(131)).unwrap(), 120);
    }
}
