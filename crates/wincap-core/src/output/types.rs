use std::fmt;

use crate::config::OutputConfig;

/// Encoding used when a captured bitmap leaves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    /// Lossy, drops the alpha channel.
    Jpeg { quality: u8 },
}

impl ImageFormat {
    /// Parse a format name ("png", "jpg", "jpeg"), case-insensitive.
    pub fn from_name(name: &str, quality: u8) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg { quality }),
            _ => None,
        }
    }

    /// Format named by a validated output config, with command-line
    /// overrides for the name and JPEG quality. Unknown names fall back to
    /// PNG.
    pub fn from_config(config: &OutputConfig, name: Option<&str>, quality: Option<u8>) -> Self {
        let name = name.unwrap_or(config.format());
        let quality = quality.unwrap_or(config.jpeg_quality());
        Self::from_name(name, quality).unwrap_or_default()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg { .. } => "jpg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "png"),
            ImageFormat::Jpeg { quality } => write!(f, "jpeg (quality {quality})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ImageFormat::from_name("png", 80), Some(ImageFormat::Png));
        assert_eq!(
            ImageFormat::from_name("JPG", 80),
            Some(ImageFormat::Jpeg { quality: 80 })
        );
        assert_eq!(
            ImageFormat::from_name("jpeg", 50),
            Some(ImageFormat::Jpeg { quality: 50 })
        );
        assert_eq!(ImageFormat::from_name("bmp", 80), None);
    }

    #[test]
    fn test_from_config() {
        let config = OutputConfig {
            format: Some("jpg".to_string()),
            jpeg_quality: Some(42),
            ..Default::default()
        };
        assert_eq!(
            ImageFormat::from_config(&config, None, None),
            ImageFormat::Jpeg { quality: 42 }
        );
        assert_eq!(
            ImageFormat::from_config(&OutputConfig::default(), None, None),
            ImageFormat::Png
        );
    }

    #[test]
    fn test_from_config_overrides() {
        let config = OutputConfig {
            format: Some("jpg".to_string()),
            jpeg_quality: Some(42),
            ..Default::default()
        };
        assert_eq!(
            ImageFormat::from_config(&config, None, Some(90)),
            ImageFormat::Jpeg { quality: 90 }
        );
        assert_eq!(
            ImageFormat::from_config(&config, Some("png"), None),
            ImageFormat::Png
        );
        assert_eq!(
            ImageFormat::from_config(&config, Some("tiff"), None),
            ImageFormat::Png
        );
    }

    #[test]
    fn test_extension() {
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::Jpeg { quality: 90 }.extension(), "jpg");
    }
}
