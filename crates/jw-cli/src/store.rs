//! YAML-backed loading and persistence for the data and state files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use jw_core::{StateStore, StateStoreError, SubmissionState, WorkLogFile};

/// Loads and validates the work-log data file.
pub fn load_worklog(path: &Path) -> Result<WorkLogFile> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_yaml::Value = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let file = jw_core::parse_document(&value)?;
    Ok(file)
}

/// Persists the submission ledger as a YAML mapping of date to entries.
#[derive(Debug, Clone)]
pub struct YamlStateStore {
    path: PathBuf,
}

impl YamlStateStore {
    /// Creates a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the ledger back from disk.
    ///
    /// A file containing no document is an empty ledger; anything else must
    /// parse as a date → entry-list mapping.
    pub fn load(&self) -> Result<SubmissionState> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(SubmissionState::new());
        }
        let state = serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(state)
    }
}

impl StateStore for YamlStateStore {
    fn save(&self, state: &SubmissionState) -> Result<(), StateStoreError> {
        let yaml = serde_yaml::to_string(state).map_err(|err| StateStoreError(err.to_string()))?;
        fs::write(&self.path, yaml)
            .map_err(|err| StateStoreError(format!("{}: {err}", self.path.display())))
    }
}
