//! Configuration loading and validation.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static TIME_STRING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^T\d{2}:\d{2}:\d{2}\.\d{3}\+\d{4}$").unwrap());
static INFILL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+h( +\d+m)?$").unwrap());

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or deserialized.
    #[error("failed to load config file: {0}")]
    Load(#[from] Box<figment::Error>),

    /// A required field was absent.
    #[error("config file is missing required field: {field}")]
    Missing { field: &'static str },

    /// A field was present but malformed.
    #[error("syntax error in config file: {field}: {value:?}")]
    Syntax { field: &'static str, value: String },
}

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Jira server hostname.
    pub server: String,

    /// Jira account name.
    pub username: String,

    /// Jira password. Prompted for interactively when absent from the
    /// file and environment; never written back to disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Start-of-day suffix appended to each date to form an entry's start
    /// timestamp, e.g. `T09:00:00.000+1000`.
    pub time_string: String,

    /// Daily time budget that infill tops days up to, e.g. `8h`.
    pub infill: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("time_string", &self.time_string)
            .field("infill", &self.infill)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: String::new(),
            username: String::new(),
            password: None,
            // Log all time as starting 9am, AEST/AEDT.
            time_string: "T09:00:00.000+1000".to_string(),
            infill: "8h".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file, layering `JW_*` environment
    /// variables on top of the file and the built-in defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("JW_"))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// The infill budget in seconds.
    pub fn budget_seconds(&self) -> Result<u64, ConfigError> {
        jw_core::parse_duration(&self.infill).map_err(|_| ConfigError::Syntax {
            field: "infill",
            value: self.infill.clone(),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.is_empty() {
            return Err(ConfigError::Missing { field: "server" });
        }
        if self.username.is_empty() {
            return Err(ConfigError::Missing { field: "username" });
        }
        if !TIME_STRING_RE.is_match(&self.time_string) {
            return Err(ConfigError::Syntax {
                field: "time_string",
                value: self.time_string.clone(),
            });
        }
        if !INFILL_RE.is_match(&self.infill) {
            return Err(ConfigError::Syntax {
                field: "infill",
                value: self.infill.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn load(contents: &str) -> Result<Config, ConfigError> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        Config::load_from(file.path())
    }

    #[test]
    fn applies_defaults_for_time_string_and_infill() {
        let config = load("server: jira.example.com\nusername: fred\n").unwrap();
        assert_eq!(config.time_string, "T09:00:00.000+1000");
        assert_eq!(config.infill, "8h");
        assert_eq!(config.password, None);
        assert_eq!(config.budget_seconds().unwrap(), 28_800);
    }

    #[test]
    fn reads_all_fields_from_the_file() {
        let config = load(concat!(
            "server: jira.example.com\n",
            "username: alex\n",
            "password: password\n",
            "time_string: 'T08:30:00.000+1100'\n",
            "infill: 7h 30m\n",
        ))
        .unwrap();
        assert_eq!(config.password.as_deref(), Some("password"));
        assert_eq!(config.time_string, "T08:30:00.000+1100");
        assert_eq!(config.budget_seconds().unwrap(), 27_000);
    }

    #[test]
    fn rejects_a_badly_formatted_time_string() {
        let err = load(concat!(
            "server: jira.example.com\n",
            "username: fred\n",
            "time_string: I_am_bad\n",
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Syntax {
                field: "time_string",
                ..
            }
        ));
    }

    #[test]
    fn rejects_a_badly_formatted_infill() {
        let err = load(concat!(
            "server: jira.example.com\n",
            "username: fred\n",
            "infill: I_am_bad\n",
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { field: "infill", .. }));
    }

    #[test]
    fn rejects_an_infill_with_trailing_noise() {
        let err = load(concat!(
            "server: jira.example.com\n",
            "username: fred\n",
            "infill: 8hfoo\n",
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { field: "infill", .. }));
    }

    #[test]
    fn rejects_a_missing_server() {
        let err = load("username: fred\n").unwrap_err();
        assert!(matches!(err, ConfigError::Missing { field: "server" }));
    }

    #[test]
    fn debug_redacts_the_password() {
        let config = load(concat!(
            "server: jira.example.com\n",
            "username: alex\n",
            "password: hunter2\n",
        ))
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
