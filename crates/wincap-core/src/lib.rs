//! wincap-core: list the top-level windows on screen and capture one as an
//! RGBA bitmap.
//!
//! The [`WindowCapture`] trait is the capture service. Each supported OS has
//! one native backend, chosen at compile time and exposed as
//! [`PlatformCapture`]. Title search is shared by all backends.

pub mod capture;
pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod output;
pub mod platform;
pub mod window;

pub use capture::{CaptureError, CaptureOptions, SerializedCapture, WindowCapture};
pub use config::WincapConfig;
pub use errors::{ConfigError, WincapError, WincapResult};
pub use logging::init_logging;
pub use output::{ImageFormat, OutputError};
pub use platform::{PlatformCapture, create_capture};
pub use window::{WindowId, WindowInfo};
