//! # Configuration System
//!
//! Hierarchical TOML configuration for wincap.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.wincap/config.toml` (global user preferences)
//! 3. **Project config** - `./.wincap/config.toml` (project-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use wincap_core::config::WincapConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WincapConfig::load_hierarchy()?;
//!     let options = config.capture.options();
//!     Ok(())
//! }
//! ```

pub mod loading;
pub mod types;
pub mod validation;

pub use types::{CaptureConfig, OutputConfig, WincapConfig};
pub use validation::{VALID_FORMATS, validate_config};

impl WincapConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }
}
