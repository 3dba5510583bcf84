//! Launch configuration.
//!
//! Settings come from three layers: a TOML config file, environment
//! variables prefixed `VOLTWATCH_`, and CLI flags. Later layers win, so
//! a flag always beats the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use voltwatch_types::{Page, Window};

/// Default station endpoint when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Default auto-refresh interval in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 30;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings loadable from a file and the environment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Base URL of the station API.
    pub endpoint: String,

    /// Page shown at startup.
    pub page: Page,

    /// Window selected at startup.
    pub window: Window,

    /// Auto-refresh interval in seconds (0 disables).
    pub refresh_secs: u64,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Append tracing output to this file.
    pub log_file: Option<PathBuf>,

    /// Restrict the alert browser to one severity level.
    pub alert_level: Option<String>,

    /// Restrict the alert browser to one source.
    pub alert_source: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page: Page::System,
            window: Window::default(),
            refresh_secs: DEFAULT_REFRESH_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
            alert_level: None,
            alert_source: None,
        }
    }
}

impl AppConfig {
    /// Load settings from an optional config file merged with
    /// `VOLTWATCH_*` environment variables.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }
        let merged = builder
            .add_source(Environment::with_prefix("VOLTWATCH"))
            .build()
            .context("loading configuration")?;

        merged
            .try_deserialize()
            .context("invalid configuration values")
    }
}
