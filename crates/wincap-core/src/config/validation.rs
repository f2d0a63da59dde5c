use crate::config::types::WincapConfig;
use crate::errors::ConfigError;

/// Image format names accepted in `[output] format`.
pub const VALID_FORMATS: &[&str] = &["png", "jpg", "jpeg"];

/// Validate the merged configuration.
pub fn validate_config(config: &WincapConfig) -> Result<(), ConfigError> {
    if let Some(format) = &config.output.format
        && !VALID_FORMATS.contains(&format.to_lowercase().as_str())
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "Invalid output format '{}'. Valid options: {}",
                format,
                VALID_FORMATS.join(", ")
            ),
        });
    }

    if let Some(quality) = config.output.jpeg_quality
        && !(1..=100).contains(&quality)
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("jpeg_quality must be between 1 and 100, got {quality}"),
        });
    }

    Ok(())
}
