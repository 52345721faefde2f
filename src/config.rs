//! Configuration management for Selene
//!
//! This module handles loading, validation, and management of the application
//! configuration from YAML files.

use crate::error::{Result, SeleneError};
use crate::smard::zones;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

mod defaults;

/// Feed resolutions supported by SMARD
pub const FEED_RESOLUTIONS: &[&str] = &["quarterhour", "hour"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SMARD bidding zone filter id (e.g. "4169" for Germany/Luxembourg)
    pub zone_id: String,

    /// Price threshold in EUR/MWh below which delayed charging is economical
    pub threshold: f64,

    /// IANA timezone used for midnight computation and same-day filtering
    pub timezone: String,

    /// Polling interval in minutes
    pub poll_interval_minutes: u64,

    /// SMARD feed endpoint configuration
    pub feed: FeedConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// SMARD feed endpoint parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Base URL of the chart data API
    pub base_url: String,

    /// Region path component of the feed URLs
    pub region: String,

    /// Series resolution (quarterhour or hour)
    pub resolution: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Optional console-specific level override
    pub console_level: Option<String>,

    /// Optional file-specific level override
    pub file_level: Option<String>,

    /// Path to log file
    pub file: String,

    /// Number of rotated files to keep
    pub backup_count: u32,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        let default_paths = [
            "selene_config.yaml",
            "/data/selene_config.yaml",
            "/etc/selene/config.yaml",
        ];

        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        // Fall back to default configuration
        Ok(Config::default())
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Resolve the configured timezone
    pub fn tz(&self) -> Result<chrono_tz::Tz> {
        chrono_tz::Tz::from_str(&self.timezone).map_err(|_| {
            SeleneError::validation("timezone", &format!("unknown timezone {}", self.timezone))
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if zones::zone_name(&self.zone_id).is_none() {
            return Err(SeleneError::validation(
                "zone_id",
                &format!("{} is not a supported SMARD bidding zone", self.zone_id),
            ));
        }

        if !self.threshold.is_finite() {
            return Err(SeleneError::validation(
                "threshold",
                "Must be a finite number",
            ));
        }

        self.tz()?;

        if self.poll_interval_minutes == 0 {
            return Err(SeleneError::validation(
                "poll_interval_minutes",
                "Must be greater than 0",
            ));
        }

        if self.feed.base_url.is_empty() {
            return Err(SeleneError::validation(
                "feed.base_url",
                "Base URL cannot be empty",
            ));
        }

        if !FEED_RESOLUTIONS.contains(&self.feed.resolution.as_str()) {
            return Err(SeleneError::validation(
                "feed.resolution",
                &format!("Must be one of {}", FEED_RESOLUTIONS.join(", ")),
            ));
        }

        if self.feed.request_timeout_secs == 0 {
            return Err(SeleneError::validation(
                "feed.request_timeout_secs",
                "Must be greater than 0",
            ));
        }

        Ok(())
    }
}
