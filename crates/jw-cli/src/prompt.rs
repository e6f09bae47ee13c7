//! Interactive password prompting.

use anyhow::{Context, Result};
use dialoguer::Password;

/// Prompts for the Jira password with echo disabled.
///
/// Used only when the config file and environment omit `password`; the
/// value lives for the run and is never written anywhere.
pub fn read_password() -> Result<String> {
    Password::new()
        .with_prompt("Enter your password")
        .interact()
        .context("failed to read password")
}
