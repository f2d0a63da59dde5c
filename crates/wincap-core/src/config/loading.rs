//! Configuration loading and merging logic.
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.wincap/config.toml`
//! 3. **Project config** - `./.wincap/config.toml`
//! 4. **CLI arguments** - Applied by the caller after loading

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::types::{CaptureConfig, OutputConfig, WincapConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".wincap";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed, or
/// if the merged configuration fails validation. Missing files are not errors.
pub fn load_hierarchy() -> Result<WincapConfig, ConfigError> {
    // Without a home directory only the project config applies
    let user_path = user_config_path()
        .map_err(|e| debug!(event = "core.config.user_config_skipped", reason = %e))
        .ok();
    let project_path = std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);

    load_hierarchy_from(user_path.as_deref(), &project_path)
}

/// Load and merge the user and project config files at explicit paths.
pub fn load_hierarchy_from(
    user_path: Option<&Path>,
    project_path: &Path,
) -> Result<WincapConfig, ConfigError> {
    let mut config = WincapConfig::default();

    if let Some(user_path) = user_path
        && let Some(user_config) = load_config_file(user_path)?
    {
        config = merge_configs(config, user_config);
    }

    if let Some(project_config) = load_config_file(project_path)? {
        config = merge_configs(config, project_config);
    }

    validate_config(&config)?;

    info!(
        event = "core.config.load_completed",
        crop_title = config.capture.crop_title(),
        format = config.output.format()
    );
    Ok(config)
}

/// Path of the user config file, if a home directory is known.
pub fn user_config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
        .ok_or(ConfigError::HomeDirUnavailable)
}

/// Read one config file. Returns `Ok(None)` when the file does not exist.
fn load_config_file(path: &Path) -> Result<Option<WincapConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(event = "core.config.file_not_found", path = %path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let config = toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    debug!(event = "core.config.file_loaded", path = %path.display());
    Ok(Some(config))
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Override values replace base values only when present.
pub fn merge_configs(base: WincapConfig, override_config: WincapConfig) -> WincapConfig {
    WincapConfig {
        capture: CaptureConfig {
            crop_title: override_config
                .capture
                .crop_title
                .or(base.capture.crop_title),
        },
        output: OutputConfig {
            directory: override_config.output.directory.or(base.output.directory),
            format: override_config.output.format.or(base.output.format),
            jpeg_quality: override_config
                .output
                .jpeg_quality
                .or(base.output.jpeg_quality),
        },
    }
}
