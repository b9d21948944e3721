//! System configuration (`config.toml`)
//!
//! Looked up at `$MEMOSCOPE_CONFIG` if set, otherwise in the platform config
//! directory (`~/.config/memoscope/config.toml` on Linux). A missing file
//! means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "MEMOSCOPE_CONFIG";

/// Every key accepted by `memo config --get/--set`
pub const KEYS: [&str; 7] = [
    "data.record_count",
    "data.seed",
    "debounce.search_quiet_period_ms",
    "debounce.default_quiet_period_ms",
    "display.table_rows",
    "logging.level",
    "logging.file",
];

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} = {value} is out of range ({min}-{max})")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    #[error("Unknown config key: {0}. Use 'memo config --list' to see available keys.")]
    UnknownKey(String),
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub data: DataConfig,
    pub debounce: DebounceConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Rows generated at startup
    pub record_count: usize,
    /// Fixed generator seed (unset = random table every run)
    pub seed: Option<u64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            record_count: memoscope_core::generate::DEFAULT_RECORD_COUNT,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Quiet period for the search box
    pub search_quiet_period_ms: u64,
    /// Quiet period for call sites that do not configure one
    pub default_quiet_period_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            search_quiet_period_ms: memoscope_watcher::SEARCH_QUIET_PERIOD.as_millis() as u64,
            default_quiet_period_ms: memoscope_watcher::DEFAULT_QUIET_PERIOD.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows printed before "Showing N of M"
    pub table_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { table_rows: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub level: String,
    /// Write logs here instead of stderr
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

fn check_range(key: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange { key, value, min, max });
    }
    Ok(())
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, expected: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: format!("'{}' is not {}", value, expected),
    })
}

impl SystemConfig {
    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("data.record_count", self.data.record_count as u64, 0, 1_000_000)?;
        check_range(
            "debounce.search_quiet_period_ms",
            self.debounce.search_quiet_period_ms,
            0,
            10_000,
        )?;
        check_range(
            "debounce.default_quiet_period_ms",
            self.debounce.default_quiet_period_ms,
            0,
            10_000,
        )?;
        check_range("display.table_rows", self.display.table_rows as u64, 1, 1000)?;

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                reason: format!("'{}' is not one of {}", self.logging.level, LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }

    /// Read one value as text
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "data.record_count" => self.data.record_count.to_string(),
            "data.seed" => optional(self.data.seed.map(|s| s.to_string())),
            "debounce.search_quiet_period_ms" => self.debounce.search_quiet_period_ms.to_string(),
            "debounce.default_quiet_period_ms" => self.debounce.default_quiet_period_ms.to_string(),
            "display.table_rows" => self.display.table_rows.to_string(),
            "logging.level" => self.logging.level.clone(),
            "logging.file" => optional(self.logging.file.as_ref().map(|p| p.display().to_string())),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// Parse and assign one value; `none` clears optional keys
    ///
    /// Does not validate ranges; call [`SystemConfig::validate`] afterwards.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "data.record_count" => {
                self.data.record_count = parse_value(key, value, "a non-negative integer")?;
            }
            "data.seed" => {
                self.data.seed = if value == "none" {
                    None
                } else {
                    Some(parse_value(key, value, "a non-negative integer or 'none'")?)
                };
            }
            "debounce.search_quiet_period_ms" => {
                self.debounce.search_quiet_period_ms =
                    parse_value(key, value, "a non-negative integer")?;
            }
            "debounce.default_quiet_period_ms" => {
                self.debounce.default_quiet_period_ms =
                    parse_value(key, value, "a non-negative integer")?;
            }
            "display.table_rows" => {
                self.display.table_rows = parse_value(key, value, "a positive integer")?;
            }
            "logging.level" => {
                self.logging.level = value.to_ascii_lowercase();
            }
            "logging.file" => {
                self.logging.file = if value == "none" {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn optional(value: Option<String>) -> String {
    value.unwrap_or_else(|| "none".to_string())
}

/// Where the config file lives
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("memoscope").join("config.toml"))
}

/// Load and validate configuration, falling back to defaults when no file exists
pub fn load() -> Result<SystemConfig> {
    let config = load_unchecked()?;
    if let Err(err) = config.validate() {
        let path = config_file_path().unwrap_or_default();
        return Err(err).with_context(|| format!("Invalid configuration in {}", path.display()));
    }
    Ok(config)
}

/// Parse the config file without range checks
///
/// `memo config` edits through this so an out-of-range value can be repaired.
pub fn load_unchecked() -> Result<SystemConfig> {
    let Some(path) = config_file_path() else {
        return Ok(SystemConfig::default());
    };
    if !path.exists() {
        return Ok(SystemConfig::default());
    }

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Validate and write configuration
pub fn save(config: &SystemConfig) -> Result<()> {
    config.validate().context("Refusing to save invalid configuration")?;

    let path = config_file_path().context("Could not determine config file path")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let text = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    std::fs::write(&path, text)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}

/// Write a default config file if none exists; returns its path
pub fn init_if_missing() -> Result<PathBuf> {
    let path = config_file_path().context("Could not determine config file path")?;
    if !path.exists() {
        save(&SystemConfig::default())?;
    }
    Ok(path)
}

/// Commented example file
pub fn example_config() -> String {
    r#"# memoscope configuration

[data]
# Rows generated at startup (0-1,000,000)
record_count = 500
# Fixed seed for a reproducible table; omit for a random table every run
# seed = 42

[debounce]
# Quiet period for the search box in milliseconds (0-10,000)
search_quiet_period_ms = 300
# Quiet period for other debounced inputs (0-10,000)
default_quiet_period_ms = 500

[display]
# Table rows printed before truncating (1-1000)
table_rows = 10

[logging]
# trace, debug, info, warn or error (RUST_LOG overrides)
level = "info"
# Log to a file instead of stderr
# file = "/tmp/memoscope.log"
"#
    .to_string()
}
