/// Service configuration loader - parses quakemon.toml
///
/// Keeps the feed location, dashboard defaults and chart settings out of
/// the code so they can be changed without recompiling. Every section is
/// optional; a missing file means built-in defaults.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::ingest::usgs_quakes::DEFAULT_FEED_BASE_URL;
use crate::model::{GeoRegion, Period, Severity};

pub const DEFAULT_CONFIG_PATH: &str = "quakemon.toml";

/// Environment variable overriding `[feed] base_url`.
pub const FEED_URL_ENV: &str = "QUAKEMON_FEED_URL";

pub const MIN_EVENT_COUNT: usize = 5;
pub const MAX_EVENT_COUNT: usize = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Invalid value '{value}' for {option}")]
    InvalidOption { option: String, value: String },
}

// ---------------------------------------------------------------------------
// Dashboard selections
// ---------------------------------------------------------------------------

/// Every user-facing filter and display selection for one render.
///
/// Passed explicitly through the pipeline; nothing reads ambient state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub severity: Severity,
    pub period: Period,
    pub region: GeoRegion,
    pub show_map: bool,
    pub show_table: bool,
    /// Table row limit; only meaningful when `show_table` is set.
    pub event_count: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            severity: Severity::All,
            period: Period::Month,
            region: GeoRegion::PuertoRico,
            show_map: true,
            show_table: true,
            event_count: MIN_EVENT_COUNT,
        }
    }
}

impl DashboardConfig {
    /// Row limit clamped to the selectable range.
    pub fn table_rows(&self) -> usize {
        self.event_count.clamp(MIN_EVENT_COUNT, MAX_EVENT_COUNT)
    }

    /// Applies a single `name=value` selection, as received from a query
    /// string or the command line.
    pub fn apply_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidOption {
            option: name.to_string(),
            value: value.to_string(),
        };

        match name {
            "severity" => self.severity = Severity::from_str(value).map_err(|_| invalid())?,
            "period" => self.period = Period::from_str(value).map_err(|_| invalid())?,
            "region" => self.region = GeoRegion::from_str(value).map_err(|_| invalid())?,
            "show_map" => self.show_map = parse_flag(value).ok_or_else(invalid)?,
            "show_table" => self.show_table = parse_flag(value).ok_or_else(invalid)?,
            "count" | "event_count" => {
                let count: usize = value.parse().map_err(|_| invalid())?;
                if !(MIN_EVENT_COUNT..=MAX_EVENT_COUNT).contains(&count) {
                    return Err(invalid());
                }
                self.event_count = count;
            }
            _ => {
                return Err(ConfigError::InvalidOption {
                    option: "option name".to_string(),
                    value: name.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Service settings
// ---------------------------------------------------------------------------

/// Where and how to fetch the earthquake feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FEED_BASE_URL.to_string(),
            user_agent: format!("quakemon_service/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

/// Bin counts for the two frequency charts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistogramSettings {
    pub magnitude_bins: usize,
    pub depth_bins: usize,
}

impl Default for HistogramSettings {
    fn default() -> Self {
        Self {
            magnitude_bins: 20,
            depth_bins: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    pub bind_address: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

/// Root configuration structure for TOML parsing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub feed: FeedSettings,
    pub dashboard: DashboardConfig,
    pub histogram: HistogramSettings,
    pub endpoint: EndpointSettings,
}

/// Parses configuration from TOML text. `origin` names the source in errors.
pub fn parse_config(contents: &str, origin: &str) -> Result<ServiceConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: origin.to_string(),
        source,
    })
}

/// Loads service configuration.
///
/// With `path == None`, reads `quakemon.toml` from the working directory
/// if it exists and falls back to defaults otherwise. An explicit path must
/// exist. `.env` is loaded first so `QUAKEMON_FEED_URL` can come from it.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    dotenv::dotenv().ok();

    let mut config = match path {
        Some(p) => read_config_file(p)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                read_config_file(default_path)?
            } else {
                log::debug!("{} not found, using defaults", DEFAULT_CONFIG_PATH);
                ServiceConfig::default()
            }
        }
    };

    if let Ok(url) = env::var(FEED_URL_ENV) {
        if !url.trim().is_empty() {
            log::info!("Feed URL overridden by {}: {}", FEED_URL_ENV, url);
            config.feed.base_url = url;
        }
    }

    Ok(config)
}

fn read_config_file(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    parse_config(&contents, &display)
}
