//! Sensor capture configuration.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration handed to the sensor driver at initialization.
///
/// Register-level tuning is the driver's concern; this only carries the
/// frame geometry and JPEG encoder quality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// JPEG encoder quality (1-63, lower is better quality).
    pub jpeg_quality: u8,
}

impl Default for SensorConfig {
    fn default() -> Self {
        // UXGA, the sensor's native still resolution.
        Self {
            width: 1600,
            height: 1200,
            jpeg_quality: 12,
        }
    }
}

impl SensorConfig {
    /// Creates a configuration with the specified frame dimensions.
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 63 {
            return Err(ConfigError::InvalidQuality);
        }
        Ok(())
    }
}
