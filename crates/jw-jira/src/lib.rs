//! Jira REST API v2 submission client.
//!
//! Submits worklog entries via
//! `POST https://{server}/rest/api/2/issue/{ticket}/worklog`, authenticated
//! with HTTP basic auth. The tracker reports `201 Created` on acceptance;
//! anything else is a failure with no retry.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use jw_core::{RemoteError, SubmissionClient};

/// Request timeout for worklog submissions.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client construction errors.
#[derive(Debug, Error)]
pub enum JiraError {
    /// The server or username was unusable.
    #[error("invalid Jira connection settings: {reason}")]
    InvalidSettings { reason: &'static str },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Blocking Jira client.
///
/// Submissions are synchronous; the worklog run waits on each response
/// before moving to the next entry.
pub struct JiraClient {
    http: reqwest::blocking::Client,
    server: String,
    username: String,
    password: String,
}

impl fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraClient")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct WorklogRequest<'a> {
    comment: &'a str,
    started: &'a str,
    #[serde(rename = "timeSpentSeconds")]
    time_spent_seconds: u64,
}

impl JiraClient {
    /// Creates a client for the given server and credentials.
    pub fn new(
        server: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, JiraError> {
        let server = server.into();
        let username = username.into();
        if server.trim().is_empty() {
            return Err(JiraError::InvalidSettings {
                reason: "server cannot be empty",
            });
        }
        if username.trim().is_empty() {
            return Err(JiraError::InvalidSettings {
                reason: "username cannot be empty",
            });
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(JiraError::ClientBuild)?;

        Ok(Self {
            http,
            server,
            username,
            password: password.into(),
        })
    }

    fn worklog_url(&self, ticket: &str) -> String {
        format!(
            "https://{}/rest/api/2/issue/{ticket}/worklog",
            self.server
        )
    }
}

impl SubmissionClient for JiraClient {
    fn submit(
        &self,
        ticket: &str,
        started: &str,
        seconds: u64,
        comment: &str,
    ) -> Result<(), RemoteError> {
        let request = WorklogRequest {
            comment,
            started,
            time_spent_seconds: seconds,
        };

        tracing::debug!(%ticket, %started, seconds, "posting worklog entry");
        let response = self
            .http
            .post(self.worklog_url(ticket))
            .basic_auth(&self.username, Some(&self.password))
            .json(&request)
            .send()
            .map_err(|err| RemoteError {
                status: None,
                body: err.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .unwrap_or_else(|err| format!("unreadable response body: {err}"));
        if status != reqwest::StatusCode::CREATED {
            return Err(RemoteError {
                status: Some(status.as_u16()),
                body,
            });
        }
        Ok(())
    }
}
