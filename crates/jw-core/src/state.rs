//! The submission ledger.
//!
//! Records, per date, the entry strings the remote service has already
//! accepted. An entry appears here only after a success response was
//! observed; the ledger is the single source of truth for "already done".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure persisting the ledger through a [`StateStore`](crate::StateStore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to persist state: {0}")]
pub struct StateStoreError(pub String);

/// Ordered mapping of ISO dates to already-submitted entry strings.
///
/// Serializes transparently as the mapping itself, so the on-disk document
/// is exactly `date: [entry, ...]` per line of history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionState {
    days: BTreeMap<String, Vec<String>>,
}

impl SubmissionState {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the date has entered reconciliation at least once.
    #[must_use]
    pub fn contains_day(&self, date: &str) -> bool {
        self.days.contains_key(date)
    }

    /// Returns a day's recorded entries, if the date is present.
    #[must_use]
    pub fn day(&self, date: &str) -> Option<&[String]> {
        self.days.get(date).map(Vec::as_slice)
    }

    /// Returns the day's entry list, creating an empty one if absent.
    pub fn day_mut_or_default(&mut self, date: &str) -> &mut Vec<String> {
        self.days.entry(date.to_string()).or_default()
    }

    /// Iterates days in ascending date order.
    pub fn days(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.days.iter()
    }

    /// True when nothing has ever been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl From<BTreeMap<String, Vec<String>>> for SubmissionState {
    fn from(days: BTreeMap<String, Vec<String>>) -> Self {
        Self { days }
    }
}
