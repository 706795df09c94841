//! Configuration for the ELA forgery-detection pipeline.

use serde::{Deserialize, Serialize};

use super::errors::{ConfigError, ConfigValidator};

/// Configuration for ELA residual construction and tamper-region extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElaConfig {
    /// JPEG quality for the residual's recompression round-trip (1-100).
    #[serde(default = "ElaConfig::default_quality")]
    pub quality: u8,

    /// Residual intensity above which a pixel counts as suspicious.
    #[serde(default = "ElaConfig::default_tamper_threshold")]
    pub tamper_threshold: u8,

    /// Minimum member-pixel count for a reported tamper region.
    ///
    /// Components at or below this size are treated as compression noise.
    #[serde(default = "ElaConfig::default_min_region_pixels")]
    pub min_region_pixels: usize,
}

impl ElaConfig {
    fn default_quality() -> u8 {
        90
    }

    fn default_tamper_threshold() -> u8 {
        50
    }

    fn default_min_region_pixels() -> usize {
        100
    }

    /// Returns a copy of this configuration with a different quality.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }
}

impl Default for ElaConfig {
    fn default() -> Self {
        Self {
            quality: Self::default_quality(),
            tamper_threshold: Self::default_tamper_threshold(),
            min_region_pixels: Self::default_min_region_pixels(),
        }
    }
}

impl ConfigValidator for ElaConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.quality == 0 || self.quality > 100 {
            return Err(ConfigError::invalid_value(
                "quality",
                format!("must be in 1..=100, got {}", self.quality),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ElaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.quality, 90);
        assert_eq!(config.tamper_threshold, 50);
        assert_eq!(config.min_region_pixels, 100);
    }

    #[test]
    fn test_quality_bounds_enforced() {
        assert!(ElaConfig::default().with_quality(0).validate().is_err());
        assert!(ElaConfig::default().with_quality(101).validate().is_err());
        assert!(ElaConfig::default().with_quality(1).validate().is_ok());
        assert!(ElaConfig::default().with_quality(100).validate().is_ok());
    }
}
