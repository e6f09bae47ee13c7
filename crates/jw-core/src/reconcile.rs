//! Reconciliation of the desired work log against the submission ledger.
//!
//! The reconciler walks the infill-resolved log in order, submits every
//! entry the ledger does not already record, and appends each accepted
//! entry to the in-memory ledger as it goes. The ledger is flushed to its
//! store on any submission failure and once after a clean run, so a crash
//! mid-run leaves it consistent with what the remote actually accepted and
//! a re-run resumes from the first unsubmitted entry.

use std::fmt;

use thiserror::Error;

use crate::duration::{DurationParseError, format_duration, parse_duration};
use crate::state::{StateStoreError, SubmissionState};
use crate::worklog::{Entry, WorkLog};

/// Failure reported by a submission client.
///
/// Carries the transport status (when the request reached the server) and
/// the response or transport error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// HTTP status code, absent for transport-level failures.
    pub status: Option<u16>,
    /// Response body or transport error text.
    pub body: String,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "returned {code}: {}", self.body),
            None => write!(f, "transport error: {}", self.body),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Capability to push one worklog entry to the remote tracker.
///
/// Implementations perform the actual remote call; the reconciler treats
/// any error as fatal to the run. The trait keeps the engine testable with
/// an in-memory fake.
pub trait SubmissionClient {
    /// Logs `seconds` of work on `ticket`, starting at `started`.
    fn submit(
        &self,
        ticket: &str,
        started: &str,
        seconds: u64,
        comment: &str,
    ) -> Result<(), RemoteError>;
}

/// Capability to persist the submission ledger.
pub trait StateStore {
    /// Writes the whole ledger to durable storage.
    fn save(&self, state: &SubmissionState) -> Result<(), StateStoreError>;
}

/// Reconciliation errors.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The remote rejected an entry. The ledger has already been flushed,
    /// so everything accepted before the failure survives a re-run.
    #[error("failed adding to worklog in {ticket} for {date}: {source}")]
    Submission {
        ticket: String,
        date: String,
        #[source]
        source: RemoteError,
    },

    /// The ledger could not be persisted.
    #[error(transparent)]
    Store(#[from] StateStoreError),

    /// An entry reached reconciliation without matching the entry grammar.
    #[error("unparseable entry {entry:?} for {date}")]
    Entry { date: String, entry: String },

    /// An infill marker survived to reconciliation unresolved.
    #[error("infill marker {entry:?} for {date} was not resolved")]
    UnresolvedMarker { date: String, entry: String },

    /// An entry's duration could not be converted to seconds.
    #[error("bad duration in {entry:?} for {date}: {source}")]
    Duration {
        date: String,
        entry: String,
        #[source]
        source: DurationParseError,
    },
}

/// Counts of what one reconciliation run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Entries submitted and recorded this run.
    pub submitted: usize,
    /// Days skipped because the ledger already matched the log exactly.
    pub skipped_days: usize,
    /// Individual entries skipped as already recorded.
    pub skipped_entries: usize,
}

/// Drives submission of not-yet-recorded entries and keeps the ledger current.
///
/// Construction takes the day-start time string explicitly; each entry's
/// start timestamp is its date concatenated with that string.
pub struct Reconciler<'a, C, S> {
    client: &'a C,
    store: &'a S,
    time_string: String,
}

impl<'a, C, S> Reconciler<'a, C, S>
where
    C: SubmissionClient,
    S: StateStore,
{
    /// Creates a reconciler over the given client and store.
    pub fn new(client: &'a C, store: &'a S, time_string: impl Into<String>) -> Self {
        Self {
            client,
            store,
            time_string: time_string.into(),
        }
    }

    /// Runs one reconciliation pass.
    ///
    /// Days and entries are processed strictly in log order. On submission
    /// failure the ledger is flushed first and the error identifies the
    /// ticket and date; nothing further is attempted.
    pub fn run(
        &self,
        worklog: &WorkLog,
        state: &mut SubmissionState,
    ) -> Result<RunReport, ReconcileError> {
        let mut report = RunReport::default();

        for (date, entries) in worklog.days() {
            if state.day(date).is_some_and(|done| done == entries.as_slice()) {
                tracing::debug!(%date, "already submitted, skipping day");
                report.skipped_days += 1;
                continue;
            }

            // Create the day's ledger list up front: a failure on the first
            // entry must still mark the day as having entered reconciliation.
            state.day_mut_or_default(date);

            for entry in entries {
                if state.day(date).is_some_and(|done| done.contains(entry)) {
                    tracing::debug!(%date, %entry, "already submitted, skipping entry");
                    report.skipped_entries += 1;
                    continue;
                }

                let (ticket, seconds, comment) = self.split_entry(date, entry)?;
                let started = format!("{date}{}", self.time_string);
                tracing::info!(
                    %ticket,
                    %date,
                    time = %format_duration(seconds),
                    "adding to worklog"
                );

                if let Err(source) = self.client.submit(&ticket, &started, seconds, &comment) {
                    tracing::error!(%ticket, %date, error = %source, "submission failed, flushing state");
                    self.store.save(state)?;
                    return Err(ReconcileError::Submission {
                        ticket,
                        date: date.clone(),
                        source,
                    });
                }

                state.day_mut_or_default(date).push(entry.clone());
                report.submitted += 1;
            }
        }

        self.store.save(state)?;
        Ok(report)
    }

    fn split_entry(
        &self,
        date: &str,
        entry: &str,
    ) -> Result<(String, u64, String), ReconcileError> {
        match Entry::parse(entry) {
            Ok(Entry::Work {
                ticket,
                duration,
                comment,
            }) => {
                let seconds =
                    parse_duration(&duration).map_err(|source| ReconcileError::Duration {
                        date: date.to_string(),
                        entry: entry.to_string(),
                        source,
                    })?;
                Ok((ticket, seconds, comment))
            }
            Ok(Entry::InfillTarget { .. } | Entry::NoInfill) => {
                Err(ReconcileError::UnresolvedMarker {
                    date: date.to_string(),
                    entry: entry.to_string(),
                })
            }
            Err(_) => Err(ReconcileError::Entry {
                date: date.to_string(),
                entry: entry.to_string(),
            }),
        }
    }
}
