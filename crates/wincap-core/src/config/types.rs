//! Configuration type definitions for wincap.
//!
//! # Example Configuration
//!
//! ```toml
//! [capture]
//! crop_title = true
//!
//! [output]
//! directory = "~/Pictures/wincap"
//! format = "jpg"
//! jpeg_quality = 85
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::capture::CaptureOptions;

/// Main configuration loaded from TOML config files.
///
/// Loaded from the user config (`~/.wincap/config.toml`) and then the project
/// config (`./.wincap/config.toml`). Project values override user values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WincapConfig {
    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CaptureConfig {
    /// Exclude the title bar from captures unless overridden on the command line.
    #[serde(default)]
    pub crop_title: Option<bool>,
}

impl CaptureConfig {
    pub fn crop_title(&self) -> bool {
        self.crop_title.unwrap_or(false)
    }

    pub fn options(&self) -> CaptureOptions {
        if self.crop_title() {
            CaptureOptions::CROP_TITLE
        } else {
            CaptureOptions::FULL_WINDOW
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    /// Directory captures are written to when no output path is given.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Image format name: "png", "jpg" or "jpeg".
    #[serde(default)]
    pub format: Option<String>,

    /// JPEG quality, 1 to 100.
    #[serde(default)]
    pub jpeg_quality: Option<u8>,
}

impl OutputConfig {
    pub const DEFAULT_FORMAT: &'static str = "png";
    pub const DEFAULT_JPEG_QUALITY: u8 = 90;

    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or(Self::DEFAULT_FORMAT)
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality.unwrap_or(Self::DEFAULT_JPEG_QUALITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WincapConfig::default();
        assert!(!config.capture.crop_title());
        assert_eq!(config.capture.options(), CaptureOptions::FULL_WINDOW);
        assert_eq!(config.output.format(), "png");
        assert_eq!(config.output.jpeg_quality(), 90);
        assert!(config.output.directory.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: WincapConfig = toml::from_str(
            r#"
[capture]
crop_title = true

[output]
directory = "/tmp/captures"
format = "jpg"
jpeg_quality = 70
"#,
        )
        .unwrap();

        assert_eq!(config.capture.options(), CaptureOptions::CROP_TITLE);
        assert_eq!(
            config.output.directory,
            Some(PathBuf::from("/tmp/captures"))
        );
        assert_eq!(config.output.format(), "jpg");
        assert_eq!(config.output.jpeg_quality(), 70);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: WincapConfig = toml::from_str("").unwrap();
        assert_eq!(config, WincapConfig::default());
    }

    #[test]
    fn test_parse_partial_section() {
        let config: WincapConfig = toml::from_str("[output]\nformat = \"jpeg\"\n").unwrap();
        assert_eq!(config.output.format(), "jpeg");
        assert_eq!(config.capture.crop_title, None);
    }
}
