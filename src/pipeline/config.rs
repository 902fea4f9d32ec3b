//! Render configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::noise::MAX_DEPTH;
use crate::terrain::{ColorMode, Sampler, CHANNELS, PRODUCTION_DEPTH};

/// Errors raised while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid dimensions: {0}x{1} (both must be positive)")]
    InvalidDimensions(u32, u32),
    #[error("Invalid scale: {0} (must be finite and positive)")]
    InvalidScale(f64),
    #[error("Depth {0} exceeds maximum of {}", MAX_DEPTH)]
    DepthTooLarge(u32),
    #[error("Image of {0}x{1} pixels does not fit in memory")]
    TooLarge(u32, u32),
}

/// Parameters of a single image generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// World detail multiplier (larger zooms out).
    pub scale: f64,
    /// Noise seed.
    pub seed: i32,
    /// Output encoding.
    pub mode: ColorMode,
    /// Height field octave count.
    pub depth: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            scale: 1.0,
            seed: 0,
            mode: ColorMode::Rendered,
            depth: PRODUCTION_DEPTH,
        }
    }
}

impl RenderConfig {
    /// Creates a configuration at production depth.
    pub fn new(width: u32, height: u32, scale: f64, seed: i32, mode: ColorMode) -> Self {
        Self {
            width,
            height,
            scale,
            seed,
            mode,
            depth: PRODUCTION_DEPTH,
        }
    }

    /// Creates a default configuration with the given seed.
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Loads a configuration from a JSON file; missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes the configuration as pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the parameters describe a renderable image.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions(self.width, self.height));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        if self.depth > MAX_DEPTH {
            return Err(ConfigError::DepthTooLarge(self.depth));
        }
        if self.checked_buffer_len().is_none() {
            return Err(ConfigError::TooLarge(self.width, self.height));
        }
        Ok(())
    }

    /// Length of the RGBA output buffer, if it fits in `usize`.
    pub fn checked_buffer_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(CHANNELS)
    }

    /// Bytes per output row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Builds the per-pixel sampler for this configuration.
    pub fn sampler(&self) -> Sampler {
        Sampler {
            scale: self.scale,
            seed: self.seed,
            depth: self.depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.depth, 18);
        assert_eq!(config.mode, ColorMode::Rendered);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let zero = RenderConfig::new(0, 10, 1.0, 0, ColorMode::Biome);
        assert!(matches!(zero.validate(), Err(ConfigError::InvalidDimensions(0, 10))));

        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = RenderConfig {
                scale,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidScale(_))));
        }

        let deep = RenderConfig {
            depth: MAX_DEPTH + 1,
            ..Default::default()
        };
        assert!(matches!(deep.validate(), Err(ConfigError::DepthTooLarge(_))));
    }

    #[test]
    fn test_with_seed_keeps_defaults() {
        let config = RenderConfig::with_seed(-12);
        assert_eq!(config.seed, -12);
        assert_eq!(
            config,
            RenderConfig {
                seed: -12,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_buffer_len() {
        let config = RenderConfig::new(10, 10, 1.0, 10, ColorMode::Biome);
        assert_eq!(config.checked_buffer_len(), Some(400));
        assert_eq!(config.row_stride(), 40);
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let config = RenderConfig::from_json_str(r#"{ "width": 64, "seed": 7, "mode": "biome" }"#).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 512);
        assert_eq!(config.seed, 7);
        assert_eq!(config.mode, ColorMode::Biome);
        assert_eq!(config.depth, 18);
    }

    #[test]
    fn test_json_rejects_unknown_mode() {
        let result = RenderConfig::from_json_str(r#"{ "mode": "satellite" }"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.json");
        let config = RenderConfig::new(33, 21, 250.0, -4, ColorMode::Biome);
        std::fs::write(&path, config.to_json_string().unwrap()).unwrap();

        let loaded = RenderConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let result = RenderConfig::from_json_file(Path::new("/nonexistent/render.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_sampler_carries_parameters() {
        let config = RenderConfig {
            scale: 3.5,
            seed: 99,
            depth: 12,
            ..Default::default()
        };
        let sampler = config.sampler();
        assert_eq!(sampler.scale, 3.5);
        assert_eq!(sampler.seed, 99);
        assert_eq!(sampler.depth, 12);
    }
}
