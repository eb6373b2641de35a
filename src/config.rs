//! Configuration file support for the syncytia counter.
//!
//! This module provides serialization and deserialization of application
//! settings, and their default location on disk.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_POLL_INITIAL_DELAY_MS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SEGMENT_CAPACITY,
};
use crate::model::MarkerStyle;
use crate::state::PollSchedule;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Store and polling settings
    #[serde(default)]
    pub counting: CountingConfig,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,
}

fn default_app_name() -> String {
    "Syncytia Counter".to_string()
}

/// Store and polling section of the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountingConfig {
    /// Number of groups per segment
    #[serde(default = "default_segment_capacity")]
    pub segment_capacity: usize,

    /// Delay before the first count refresh
    #[serde(default = "default_poll_initial_delay_ms")]
    pub poll_initial_delay_ms: u64,

    /// Delay between count refreshes
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_segment_capacity() -> usize {
    DEFAULT_SEGMENT_CAPACITY
}

fn default_poll_initial_delay_ms() -> u64 {
    DEFAULT_POLL_INITIAL_DELAY_MS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            segment_capacity: default_segment_capacity(),
            poll_initial_delay_ms: default_poll_initial_delay_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl CountingConfig {
    /// Segment capacity, never below 1.
    pub fn capacity(&self) -> usize {
        self.segment_capacity.max(1)
    }

    pub fn poll_schedule(&self) -> PollSchedule {
        PollSchedule::from_millis(self.poll_initial_delay_ms, self.poll_interval_ms)
    }
}

/// User preferences section of the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Marker size, shape and label visibility
    #[serde(default)]
    pub marker_style: MarkerStyle,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Last folder used for loading or saving markers
    #[serde(default)]
    pub last_folder: String,
}

impl UserPreferences {
    /// The last folder, if one was recorded.
    pub fn last_folder(&self) -> Option<PathBuf> {
        (!self.last_folder.is_empty()).then(|| PathBuf::from(&self.last_folder))
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            counting: CountingConfig::default(),
            preferences: UserPreferences::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "syncytia-config.json"
    }

    /// Get the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("syncytia").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("syncytia")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from `path`, falling back to defaults.
    ///
    /// A missing, unreadable or unparsable file gives the defaults; a file
    /// written by a newer version is an error.
    pub fn load_or_default(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return Ok(Self::default());
        }

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from {:?}", path);
                    Ok(config)
                }
                Err(e @ ConfigError::VersionTooNew { .. }) => Err(e),
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                    Ok(Self::default())
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from the default path.
    pub fn load_from_default_path() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_or_default(&path),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MarkerSize;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.counting.capacity(), DEFAULT_SEGMENT_CAPACITY);
        assert_eq!(
            config.counting.poll_schedule(),
            PollSchedule::from_millis(1000, 100)
        );
        assert_eq!(config.preferences.log_level, LogLevel::Info);
        assert!(config.preferences.last_folder().is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = AppConfig::new();
        config.counting.segment_capacity = 10;
        config.preferences.marker_style.size = MarkerSize::Large;
        config.preferences.last_folder = "/data/images".to_string();

        let loaded = AppConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(loaded.counting, config.counting);
        assert_eq!(loaded.preferences.marker_style, config.preferences.marker_style);
        assert_eq!(
            loaded.preferences.last_folder(),
            Some(PathBuf::from("/data/images"))
        );
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config = AppConfig::from_json(r#"{"version": 1}"#).unwrap();
        assert_eq!(config.app_name, "Syncytia Counter");
        assert_eq!(config.counting, CountingConfig::default());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let config =
            AppConfig::from_json(r#"{"version": 1, "counting": {"segment_capacity": 0}}"#).unwrap();
        assert_eq!(config.counting.capacity(), 1);
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = AppConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(err, ConfigError::VersionTooNew { file_version: 99, .. }));
    }

    #[test]
    fn test_load_or_default_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let missing = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(missing.counting, CountingConfig::default());

        let mut config = AppConfig::new();
        config.counting.poll_interval_ms = 250;
        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.counting.poll_interval_ms, 250);

        std::fs::write(&path, "{ broken").unwrap();
        let broken = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(broken.counting, CountingConfig::default());

        std::fs::write(&path, r#"{"version": 7}"#).unwrap();
        assert!(AppConfig::load_or_default(&path).is_err());
    }
}
