use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jw_cli::store::{self, YamlStateStore};
use jw_cli::{Cli, Config, prompt};
use jw_core::{InfillOptions, Reconciler};
use jw_jira::JiraClient;

/// Resolved locations of the three input files.
struct Paths {
    config_file: PathBuf,
    data_file: PathBuf,
    state_file: PathBuf,
}

impl Paths {
    fn resolve(cli: &Cli) -> Result<Self> {
        let base = dirs::home_dir()
            .context("failed to determine home directory")?
            .join(".jira_worklog");
        Ok(Self {
            config_file: cli
                .config_file
                .clone()
                .unwrap_or_else(|| base.join("config.yml")),
            data_file: cli.data_file.clone().unwrap_or_else(|| base.join("data.yml")),
            state_file: cli
                .state_file
                .clone()
                .unwrap_or_else(|| base.join("state.yml")),
        })
    }

    fn ensure_exist(&self) -> Result<()> {
        for path in [&self.config_file, &self.data_file, &self.state_file] {
            if !path.exists() {
                bail!("File not found: {}", path.display());
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let paths = Paths::resolve(&cli)?;
    paths.ensure_exist()?;

    let mut config = Config::load_from(&paths.config_file)?;
    tracing::debug!(?config, "loaded configuration");
    if config.password.is_none() {
        config.password = Some(prompt::read_password()?);
    }

    let data = store::load_worklog(&paths.data_file)
        .with_context(|| format!("failed to load {}", paths.data_file.display()))?;
    let state_store = YamlStateStore::new(&paths.state_file);
    let mut state = state_store
        .load()
        .with_context(|| format!("failed to load {}", paths.state_file.display()))?;

    let options = InfillOptions {
        default_ticket: data.default_ticket.clone(),
        budget_seconds: config.budget_seconds()?,
    };
    let mut worklog = data.worklog;
    jw_core::resolve_infill(&mut worklog, &state, &options)?;

    let password = config.password.clone().unwrap_or_default();
    let client = JiraClient::new(&config.server, &config.username, password)?;
    let reconciler = Reconciler::new(&client, &state_store, config.time_string.clone());
    let report = reconciler.run(&worklog, &mut state)?;

    println!(
        "Submitted {} new entries; {} days already up to date.",
        report.submitted, report.skipped_days
    );
    Ok(())
}
