//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Submits a declarative work log to Jira.
///
/// Reads the day-by-day work log from the data file, tops each weekday up
/// to the configured time budget, and submits whatever the state file does
/// not already record. Safe to re-run: nothing is ever submitted twice.
#[derive(Debug, Parser)]
#[command(name = "jw", version, about, long_about = None)]
pub struct Cli {
    /// Data file with worklog entries.
    #[arg(short = 'f', long)]
    pub data_file: Option<PathBuf>,

    /// File containing server, user name and infill settings.
    #[arg(short, long)]
    pub config_file: Option<PathBuf>,

    /// File recording already-submitted entries.
    #[arg(short, long)]
    pub state_file: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
