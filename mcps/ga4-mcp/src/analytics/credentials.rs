//! Access tokens for the analytics data API
//!
//! Either a static bearer token from configuration, or one minted per call by
//! the Google Cloud CLI from Application Default Credentials (which honours
//! `GOOGLE_APPLICATION_CREDENTIALS`).

use std::fmt;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use super::error::{AnalyticsError, AnalyticsResult};
use crate::config::AnalyticsConfig;

/// OAuth scope requested for report queries
pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";

/// Where bearer tokens come from
#[derive(Clone, PartialEq, Eq)]
pub enum AccessTokenSource {
    /// A fixed token
    Static(String),
    /// `<program> auth application-default print-access-token`
    Gcloud { program: String },
}

impl fmt::Debug for AccessTokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessTokenSource::Static(_) => f.write_str("Static(<redacted>)"),
            AccessTokenSource::Gcloud { program } => {
                f.debug_struct("Gcloud").field("program", program).finish()
            }
        }
    }
}

impl AccessTokenSource {
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        match config.access_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => AccessTokenSource::Static(token.to_string()),
            _ => AccessTokenSource::Gcloud {
                program: config.gcloud_program.clone(),
            },
        }
    }

    /// Fetch a token for one request
    pub async fn access_token(&self) -> AnalyticsResult<String> {
        match self {
            AccessTokenSource::Static(token) => Ok(token.clone()),
            AccessTokenSource::Gcloud { program } => print_access_token(program).await,
        }
    }
}

#[instrument]
async fn print_access_token(program: &str) -> AnalyticsResult<String> {
    let scopes = format!("--scopes={}", ANALYTICS_READONLY_SCOPE);
    let args = [
        "auth",
        "application-default",
        "print-access-token",
        scopes.as_str(),
    ];
    debug!("executing: {} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AnalyticsError::CredentialHelperNotFound(program.to_string())
            } else {
                AnalyticsError::Credentials(format!("failed to spawn {}: {}", program, e))
            }
        })?
        .wait_with_output()
        .await
        .map_err(|e| AnalyticsError::Credentials(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let code = output.status.code().unwrap_or(-1);
        error!(code, stderr = %stderr, "credential helper failed");
        return Err(AnalyticsError::Credentials(format!(
            "{} exited with code {}: {}",
            program, code, stderr
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(AnalyticsError::Credentials(format!(
            "{} printed an empty token",
            program
        )));
    }
    Ok(token)
}
