//! Work-log model and document validation.
//!
//! A work log is an ordered mapping of ISO dates to lists of entry strings.
//! The entry string itself is the unit of identity throughout the system:
//! the submission ledger records the same strings, and membership checks
//! compare them verbatim. [`Entry`] is a structural view used where the
//! pieces (ticket, duration, comment) are needed.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Marker literal disabling automatic infill for a day.
pub const NO_INFILL: &str = "noinfill";

/// Sentinel duration naming a day's explicit infill ticket.
pub const INFILL: &str = "infill";

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]+-\d+:(\d+h +\d+m|\d+m|\d+h|\d+|infill)(:.*)?$").unwrap()
});
static WORK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]+-\d+):(\d+h +\d+m|\d+m|\d+h|\d+)(?::(.*))?$").unwrap()
});
static INFILL_TARGET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+-\d+):infill(?::.*)?$").unwrap());

/// Validation errors for the work-log document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorklogError {
    /// The document has no `worklog` key.
    #[error("no worklog found in data file")]
    MissingWorklog,

    /// The `worklog` value is not a mapping of dates to lists of strings.
    #[error("expected worklog to be a mapping of dates to entry lists: {detail}")]
    Shape { detail: String },

    /// A date key does not match `YYYY-MM-DD`.
    #[error("expected dates in worklog to be in ISO date format: {key:?}")]
    DateFormat { key: String },

    /// An entry string does not match the entry grammar.
    #[error("syntax error in worklog: {entry:?} on {date}")]
    EntrySyntax { date: String, entry: String },
}

/// Error for a single entry string that does not match the entry grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("syntax error in worklog entry: {entry:?}")]
pub struct EntryParseError {
    /// The offending entry.
    pub entry: String,
}

/// A structural view of one entry string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// `TICKET:DURATION[:COMMENT]` — a concrete piece of work.
    Work {
        ticket: String,
        duration: String,
        comment: String,
    },
    /// `TICKET:infill` — names the day's explicit infill ticket.
    InfillTarget { ticket: String },
    /// The literal `noinfill` opt-out marker.
    NoInfill,
}

impl Entry {
    /// Parses an entry string into its structural form.
    pub fn parse(raw: &str) -> Result<Self, EntryParseError> {
        if raw == NO_INFILL {
            return Ok(Self::NoInfill);
        }
        if let Some(caps) = INFILL_TARGET_RE.captures(raw) {
            return Ok(Self::InfillTarget {
                ticket: caps[1].to_string(),
            });
        }
        if let Some(caps) = WORK_RE.captures(raw) {
            return Ok(Self::Work {
                ticket: caps[1].to_string(),
                duration: caps[2].to_string(),
                comment: caps.get(3).map_or_else(String::new, |m| m.as_str().to_string()),
            });
        }
        Err(EntryParseError {
            entry: raw.to_string(),
        })
    }
}

/// Ordered mapping of ISO dates to that day's declared entry strings.
///
/// Dates iterate in ascending order; entry order within a day is preserved
/// verbatim and is the order submissions occur in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkLog {
    days: BTreeMap<String, Vec<String>>,
}

impl WorkLog {
    /// Creates an empty work log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) a day's entry list.
    pub fn insert_day(&mut self, date: impl Into<String>, entries: Vec<String>) {
        self.days.insert(date.into(), entries);
    }

    /// Returns a day's entries, if the date is present.
    #[must_use]
    pub fn day(&self, date: &str) -> Option<&[String]> {
        self.days.get(date).map(Vec::as_slice)
    }

    /// Iterates days in ascending date order.
    pub fn days(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.days.iter()
    }

    /// Iterates days in ascending date order with mutable entry lists.
    pub fn days_mut(&mut self) -> impl Iterator<Item = (&String, &mut Vec<String>)> {
        self.days.iter_mut()
    }

    /// Number of days in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// True when no days are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl From<BTreeMap<String, Vec<String>>> for WorkLog {
    fn from(days: BTreeMap<String, Vec<String>>) -> Self {
        Self { days }
    }
}

/// The parsed data document: the work log plus its optional catch-all ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkLogFile {
    /// Ticket automatic infill is logged against, from the `default` key.
    pub default_ticket: Option<String>,
    /// The declared work log.
    pub worklog: WorkLog,
}

/// Validates a raw YAML document into a [`WorkLogFile`].
///
/// Checks only the work-log shape and entry grammar; config and state are
/// validated by their own loaders.
pub fn parse_document(value: &serde_yaml::Value) -> Result<WorkLogFile, WorklogError> {
    let worklog_value = value.get("worklog").ok_or(WorklogError::MissingWorklog)?;
    let mapping = worklog_value.as_mapping().ok_or_else(|| WorklogError::Shape {
        detail: "worklog is not a mapping".to_string(),
    })?;

    let mut worklog = WorkLog::new();
    for (key, day_value) in mapping {
        let date = key.as_str().ok_or_else(|| WorklogError::Shape {
            detail: "date key is not a string".to_string(),
        })?;
        if !DATE_RE.is_match(date) {
            return Err(WorklogError::DateFormat {
                key: date.to_string(),
            });
        }
        let sequence = day_value.as_sequence().ok_or_else(|| WorklogError::Shape {
            detail: format!("entries for {date} are not a list"),
        })?;

        let mut entries = Vec::with_capacity(sequence.len());
        for element in sequence {
            let entry = element.as_str().ok_or_else(|| WorklogError::Shape {
                detail: format!("entry for {date} is not a string"),
            })?;
            if entry != NO_INFILL && !ENTRY_RE.is_match(entry) {
                return Err(WorklogError::EntrySyntax {
                    date: date.to_string(),
                    entry: entry.to_string(),
                });
            }
            entries.push(entry.to_string());
        }
        worklog.insert_day(date, entries);
    }

    let default_ticket = match value.get("default") {
        Some(ticket) => Some(
            ticket
                .as_str()
                .ok_or_else(|| WorklogError::Shape {
                    detail: "default ticket is not a string".to_string(),
                })?
                .to_string(),
        ),
        None => None,
    };

    Ok(WorkLogFile {
        default_ticket,
        worklog,
    })
}
