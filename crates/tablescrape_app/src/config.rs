use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use engine_logging::LogDestination;
use serde::Deserialize;
use tablescrape_engine::FetchSettings;

pub const DEFAULT_CONFIG_FILE: &str = "tablescrape.ron";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub log: LogConfig,
    /// Rows of the current table printed under its header.
    pub preview_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            log: LogConfig::default(),
            preview_rows: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let settings = FetchSettings::default();
        Self {
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            redirect_limit: settings.redirect_limit,
            max_bytes: settings.max_bytes,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn to_settings(&self) -> FetchSettings {
        let mut settings = FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        };
        if let Some(agent) = &self.user_agent {
            settings.user_agent = agent.clone();
        }
        settings
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogDestination,
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogDestination::File,
            level: "info".to_string(),
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Defaults,
}

/// Reads a RON config file. A missing file yields the defaults; an unreadable or malformed one is an error.
pub fn load_config(path: &Path) -> anyhow::Result<(AppConfig, ConfigOrigin)> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Ok((AppConfig::default(), ConfigOrigin::Defaults));
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };

    let config: AppConfig = ron::from_str(&text)
        .with_context(|| format!("malformed config {}", path.display()))?;
    Ok((config, ConfigOrigin::File(path.to_path_buf())))
}
