//! Fetch configuration.
//!
//! Every field has a default, so an empty TOML file (or no file at all)
//! yields a working configuration.

use crate::data::provider::Interval;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for the data retriever and the Yahoo provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Length of the daily history window, in calendar days.
    pub history_days: i64,
    /// Range of the quarterly price series (provider syntax, e.g. `5y`).
    pub quarterly_range: String,
    pub quarterly_interval: Interval,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub chart_base_url: String,
    pub summary_base_url: String,
    pub cookie_url: String,
    pub crumb_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            history_days: 5 * 365,
            quarterly_range: "5y".into(),
            quarterly_interval: Interval::Quarterly,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
            timeout_secs: 30,
            chart_base_url: "https://query2.finance.yahoo.com".into(),
            summary_base_url: "https://query2.finance.yahoo.com".into(),
            cookie_url: "https://fc.yahoo.com".into(),
            crumb_url: "https://query1.finance.yahoo.com/v1/test/getcrumb".into(),
        }
    }
}

impl FetchConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}
