//! Configuration loading for ga4-mcp
//!
//! Configuration is loaded from (lowest to highest precedence):
//! 1. Default values
//! 2. TOML file at `GA4_MCP_CONFIG_PATH`, else `~/.ga4-mcp/config.toml`
//! 3. `.env` in the working directory (loaded silently)
//! 4. Environment variables `GA_PROPERTY_ID`, `GA4_API_BASE_URL`,
//!    `GA_ACCESS_TOKEN`, `GA4_MCP_QUIET`
//!
//! The resulting [`Config`] is built once at startup and never mutated.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::analytics::AnalyticsError;
use crate::types::{property_resource_name, DateRange};

pub const PROPERTY_ID_ENV: &str = "GA_PROPERTY_ID";
pub const API_BASE_URL_ENV: &str = "GA4_API_BASE_URL";
pub const ACCESS_TOKEN_ENV: &str = "GA_ACCESS_TOKEN";
pub const QUIET_ENV: &str = "GA4_MCP_QUIET";
pub const CONFIG_PATH_ENV: &str = "GA4_MCP_CONFIG_PATH";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Data API connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Property queried when a call does not name one
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Static bearer token; when unset tokens come from `gcloud`
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
    #[serde(default = "default_gcloud_program")]
    pub gcloud_program: String,
}

/// Report defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    #[serde(default = "default_start_date")]
    pub default_start_date: String,
    #[serde(default = "default_end_date")]
    pub default_end_date: String,
    #[serde(default = "default_realtime_metric")]
    pub realtime_default_metric: String,
}

/// Process-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Only warnings and errors are logged when set
    #[serde(default)]
    pub quiet_startup: bool,
}

fn default_api_base_url() -> String {
    "https://analyticsdata.googleapis.com/v1beta".to_string()
}

fn default_gcloud_program() -> String {
    "gcloud".to_string()
}

fn default_start_date() -> String {
    "30daysAgo".to_string()
}

fn default_end_date() -> String {
    "today".to_string()
}

fn default_realtime_metric() -> String {
    "activeUsers".to_string()
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            property_id: None,
            api_base_url: default_api_base_url(),
            access_token: None,
            gcloud_program: default_gcloud_program(),
        }
    }
}

impl fmt::Debug for AnalyticsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyticsConfig")
            .field("property_id", &self.property_id)
            .field("api_base_url", &self.api_base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("gcloud_program", &self.gcloud_program)
            .finish()
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            default_start_date: default_start_date(),
            default_end_date: default_end_date(),
            realtime_default_metric: default_realtime_metric(),
        }
    }
}

/// `None` for missing, empty or whitespace-only arguments
fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl AnalyticsConfig {
    /// Resource name for the requested property, falling back to the
    /// configured default
    pub fn property_resource(&self, requested: Option<String>) -> Result<String, AnalyticsError> {
        provided(requested)
            .or_else(|| provided(self.property_id.clone()))
            .ok_or(AnalyticsError::MissingPropertyId)
            .and_then(|id| property_resource_name(&id))
    }
}

impl ReportsConfig {
    /// Each bound defaults on its own
    pub fn date_range(&self, start_date: Option<String>, end_date: Option<String>) -> DateRange {
        DateRange {
            start_date: provided(start_date).unwrap_or_else(|| self.default_start_date.clone()),
            end_date: provided(end_date).unwrap_or_else(|| self.default_end_date.clone()),
        }
    }

    /// Caller metrics, or the single default metric when none were given
    pub fn realtime_metrics(&self, metrics: Option<Vec<String>>) -> Vec<String> {
        match metrics {
            Some(metrics) if !metrics.is_empty() => metrics,
            _ => vec![self.realtime_default_metric.clone()],
        }
    }
}

/// A missing `.env` is fine; an unreadable or malformed one is not
fn check_env_file<T>(result: dotenvy::Result<T>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).context("Failed to load .env"),
    }
}

impl Config {
    /// Load configuration from file, `.env` and the process environment
    pub fn load() -> Result<Self> {
        // dotenvy never prints; stdout stays clean for the protocol
        check_env_file(dotenvy::dotenv())?;

        let mut config = Self::from_file(Self::find_config_path().as_deref())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a TOML file, or defaults when there is no file
    pub fn from_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config from {:?}", path))?;
                let mut config: Config = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config from {:?}", path))?;
                config.source = Some(path.to_path_buf());
                Ok(config)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Overlay environment variables read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = provided(lookup(PROPERTY_ID_ENV)) {
            self.analytics.property_id = Some(id);
        }
        if let Some(url) = provided(lookup(API_BASE_URL_ENV)) {
            self.analytics.api_base_url = url;
        }
        if let Some(token) = provided(lookup(ACCESS_TOKEN_ENV)) {
            self.analytics.access_token = Some(token);
        }
        if let Some(quiet) = lookup(QUIET_ENV) {
            self.server.quiet_startup = is_truthy(&quiet);
        }
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }

        dirs::home_dir().map(|home| home.join(".ga4-mcp").join("config.toml"))
    }
}
