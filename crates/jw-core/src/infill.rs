//! Daily time-budget infill.
//!
//! Tops up each weekday's declared entries to the configured budget against
//! a catch-all ticket, unless the day opts out (`noinfill`), names its own
//! target (`TICKET:infill`), or has already been reconciled once. Marker
//! entries are consumed here: they are stripped from every day, weekends
//! included, and never reach submission or the ledger.

use thiserror::Error;

use crate::calendar::{self, InvalidDateError};
use crate::duration::{DurationParseError, format_duration, parse_duration};
use crate::state::SubmissionState;
use crate::worklog::{Entry, EntryParseError, WorkLog};

/// Settings for infill resolution.
#[derive(Debug, Clone)]
pub struct InfillOptions {
    /// Catch-all ticket for automatic infill, from the data file's `default`
    /// key. Without one, automatic infill is disabled.
    pub default_ticket: Option<String>,
    /// Daily time budget in seconds.
    pub budget_seconds: u64,
}

/// Infill resolution errors.
#[derive(Debug, Error)]
pub enum InfillError {
    /// A day declared more time than its explicit infill budget allows.
    #[error("declared time on {date} exceeds the infill budget: {entries:?}")]
    Overflow { date: String, entries: Vec<String> },

    /// A date key passed format validation but is not a real calendar date.
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),

    /// An entry did not match the entry grammar.
    #[error("{source} on {date}")]
    Entry {
        date: String,
        #[source]
        source: EntryParseError,
    },

    /// An entry's duration could not be converted to seconds.
    #[error("{source} on {date}")]
    Duration {
        date: String,
        #[source]
        source: DurationParseError,
    },
}

/// Resolves infill for every day of the log, in place.
///
/// After this returns, the log contains only submittable
/// `TICKET:DURATION[:COMMENT]` entries: markers are gone and any computed
/// infill entry has been appended at the end of its day.
pub fn resolve(
    worklog: &mut WorkLog,
    state: &SubmissionState,
    options: &InfillOptions,
) -> Result<(), InfillError> {
    for (date, entries) in worklog.days_mut() {
        let weekend = calendar::is_weekend(date)?;

        let mut kept: Vec<String> = Vec::with_capacity(entries.len());
        let mut explicit_target: Option<String> = None;
        let mut opted_out = false;
        let mut total: u64 = 0;

        for raw in entries.iter() {
            match Entry::parse(raw) {
                Ok(Entry::NoInfill) => opted_out = true,
                Ok(Entry::InfillTarget { ticket }) => explicit_target = Some(ticket),
                Ok(Entry::Work { duration, .. }) => {
                    let seconds = parse_duration(&duration).map_err(|source| {
                        InfillError::Duration {
                            date: date.clone(),
                            source,
                        }
                    })?;
                    total = total.saturating_add(seconds);
                    kept.push(raw.clone());
                }
                Err(source) => {
                    return Err(InfillError::Entry {
                        date: date.clone(),
                        source,
                    });
                }
            }
        }

        if weekend {
            tracing::debug!(%date, "weekend, no infill");
            *entries = kept;
            continue;
        }

        if let Some(ticket) = explicit_target {
            if total > options.budget_seconds {
                return Err(InfillError::Overflow {
                    date: date.clone(),
                    entries: entries.clone(),
                });
            }
            let shortfall = options.budget_seconds - total;
            tracing::debug!(%date, %ticket, seconds = shortfall, "explicit infill");
            kept.push(format!("{ticket}:{}", format_duration(shortfall)));
        } else if !opted_out && !state.contains_day(date) && total < options.budget_seconds {
            if let Some(ticket) = &options.default_ticket {
                let shortfall = options.budget_seconds - total;
                tracing::debug!(%date, %ticket, seconds = shortfall, "automatic infill");
                kept.push(format!("{ticket}:{}", format_duration(shortfall)));
            }
        }

        *entries = kept;
    }
    Ok(())
}
