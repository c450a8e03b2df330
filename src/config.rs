//! Configuration for a comparison run
//!
//! Holds the external tool invocation parameters and figure settings,
//! with validation in the same shape as the rest of the crate's errors.

use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};
use crate::types::{DEFAULT_LENGTH_SECS, DEFAULT_TOOL};

/// Default figure width in pixels
pub const DEFAULT_WIDTH: u32 = 1600;

/// Default figure height in pixels
pub const DEFAULT_HEIGHT: u32 = 900;

/// Smallest accepted figure side
pub const MIN_FIGURE_SIDE: u32 = 64;

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Fingerprinting executable, looked up on `PATH`
    pub tool: String,
    /// Seconds of audio to analyse
    pub length_secs: u32,
    /// Figure settings
    pub figure: FigureConfig,
    /// Suppress progress output
    pub quiet: bool,
}

/// Figure layout settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// TrueType font for titles and labels; searched for when unset
    pub font_path: Option<PathBuf>,
}

impl CompareConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            length_secs: DEFAULT_LENGTH_SECS,
            figure: FigureConfig::default(),
            quiet: false,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.tool.trim().is_empty() {
            return Err(ConfigError::EmptyTool);
        }
        if self.length_secs == 0 {
            return Err(ConfigError::InvalidLength(self.length_secs));
        }
        self.figure.validate()
    }
}

impl FigureConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width < MIN_FIGURE_SIDE || self.height < MIN_FIGURE_SIDE {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if let Some(path) = &self.font_path {
            if !path.is_file() {
                return Err(ConfigError::FontNotFound(path.clone()));
            }
        }
        Ok(())
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            font_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CompareConfig::default();
        assert!(config.validate().is_ok(), "Default config should be valid");
        assert_eq!(config.tool, "fpcalc");
        assert_eq!(config.length_secs, 120);
    }

    #[test]
    fn test_rejects_empty_tool() {
        let mut config = CompareConfig::new();
        config.tool = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyTool)));
    }

    #[test]
    fn test_rejects_missing_font() {
        let mut config = CompareConfig::new();
        config.figure.font_path = Some(PathBuf::from("/nonexistent/font.ttf"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FontNotFound(_))
        ));
    }

    proptest! {
        #[test]
        fn test_length_validation(length in 0u32..10_000) {
            let mut config = CompareConfig::new();
            config.length_secs = length;
            prop_assert_eq!(config.validate().is_ok(), length > 0);
        }

        #[test]
        fn test_dimension_validation(width in 0u32..4096, height in 0u32..4096) {
            let figure = FigureConfig { width, height, font_path: None };
            let expected = width >= MIN_FIGURE_SIDE && height >= MIN_FIGURE_SIDE;
            prop_assert_eq!(figure.validate().is_ok(), expected);
        }
    }
}
