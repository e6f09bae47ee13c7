//! Core logic for the Jira worklog synchronizer.
//!
//! This crate contains the fundamental types and logic for:
//! - Duration codec: `"2h 30m"` text to seconds and back
//! - Work-log validation: typed model over the raw YAML document
//! - Infill: topping up each weekday to the configured time budget
//! - Reconciliation: submitting exactly the entries the ledger lacks
//!
//! All I/O happens behind the [`SubmissionClient`] and [`StateStore`]
//! capability traits, so the engines are testable with in-memory fakes.

pub mod calendar;
pub mod duration;
pub mod infill;
pub mod reconcile;
pub mod state;
pub mod worklog;

pub use calendar::{InvalidDateError, is_weekend};
pub use duration::{DurationParseError, format_duration, parse_duration};
pub use infill::{InfillError, InfillOptions, resolve as resolve_infill};
pub use reconcile::{
    ReconcileError, Reconciler, RemoteError, RunReport, StateStore, SubmissionClient,
};
pub use state::{StateStoreError, SubmissionState};
pub use worklog::{Entry, EntryParseError, WorkLog, WorkLogFile, WorklogError, parse_document};
