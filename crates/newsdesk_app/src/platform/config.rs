//! Settings: an optional RON file overlaid with command line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use newsdesk_core::DEFAULT_PAGE_SIZE;
use newsdesk_engine::ClientSettings;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILENAME: &str = "newsdesk.ron";

#[derive(Debug, Parser)]
#[command(name = "newsdesk", version, about = "Search and browse the news service from a terminal")]
pub struct Cli {
    /// Settings file (RON). Defaults to ./newsdesk.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Root URL of the search service.
    #[arg(long)]
    pub base_url: Option<String>,
    /// Batch size the service pages with.
    #[arg(long)]
    pub page_size: Option<usize>,
    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub page_size: usize,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            base_url: client.base_url,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_response_bytes: client.max_bytes,
            page_size: DEFAULT_PAGE_SIZE,
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(page_size) = cli.page_size {
            self.page_size = page_size;
        }
        if let Some(destination) = cli.log {
            self.log_destination = destination;
        }
        self
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }

    /// Unknown level names fall back to info.
    pub fn log_level(&self) -> LevelFilter {
        newsdesk_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Loads settings from `explicit`, or from `./newsdesk.ron` when no path is
/// given. Only the implicit default file may be absent.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    match explicit {
        Some(path) => read_settings(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILENAME);
            if path.exists() {
                read_settings(path)
            } else {
                Ok(Settings::default())
            }
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
