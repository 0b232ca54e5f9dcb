//! File-based configuration.

use crate::sensor::SensorConfig;
use crate::storage::MountPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation and loading errors.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Frame dimensions must be nonzero.
    #[error("invalid frame dimensions")]
    InvalidDimensions,
    /// JPEG quality must be in 1-63.
    #[error("invalid JPEG quality (must be 1-63)")]
    InvalidQuality,
    /// At least one mount attempt is required.
    #[error("invalid mount retry count (must be at least 1)")]
    InvalidRetryCount,
    /// At least one capture is required.
    #[error("invalid capture count (must be at least 1)")]
    InvalidCaptureCount,
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The configuration file could not be parsed.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Session-level settings: how many captures, where they land, and how
/// the loop is paced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of stills to capture.
    pub capture_count: u32,
    /// Storage root where image files are written.
    pub output_dir: PathBuf,
    /// Pause between capture iterations, in milliseconds.
    pub inter_capture_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capture_count: 5,
            output_dir: PathBuf::from("/sdcard"),
            inter_capture_delay_ms: 1000,
        }
    }
}

impl SessionConfig {
    /// Returns the inter-capture pause as a duration.
    pub fn inter_capture_delay(&self) -> Duration {
        Duration::from_millis(self.inter_capture_delay_ms)
    }

    /// Validates the session parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capture_count == 0 {
            return Err(ConfigError::InvalidCaptureCount);
        }
        Ok(())
    }
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Mount retry policy.
    #[serde(default)]
    pub storage: MountPolicy,
    /// Sensor configuration.
    #[serde(default)]
    pub sensor: SensorConfig,
    /// Session loop configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file and validates every section.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storage.validate()?;
        self.sensor.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_captures_invalid() {
        let mut config = FileConfig::default();
        config.session.capture_count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCaptureCount)
        ));
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml = r#"
            [storage]
            max_retries = 5
            backoff_ms = 500

            [session]
            capture_count = 2
            output_dir = "/mnt/sd"
            inter_capture_delay_ms = 250
        "#;
        let config: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.storage.max_retries, 5);
        assert_eq!(config.session.capture_count, 2);
        // Omitted section falls back to defaults.
        assert_eq!(config.sensor.width, 1600);
    }

    #[test]
    fn test_missing_file_reported() {
        assert!(matches!(
            FileConfig::from_file("/nonexistent/still-capture.toml"),
            Err(ConfigError::FileReadError(_))
        ));
    }
}
