//! Native capture backends, one per supported platform.
//!
//! Exactly one backend is compiled per target and exposed as
//! [`PlatformCapture`].

pub mod resource;

use crate::capture::WindowCapture;
use crate::events;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
mod unsupported;
#[cfg(target_os = "windows")]
mod win32;

#[cfg(target_os = "macos")]
pub use macos::MacCapture;
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub use unsupported::UnsupportedCapture;
#[cfg(target_os = "windows")]
pub use win32::GdiCapture;

#[cfg(target_os = "macos")]
pub type PlatformCapture = MacCapture;
#[cfg(target_os = "windows")]
pub type PlatformCapture = GdiCapture;
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub type PlatformCapture = UnsupportedCapture;

/// Create the capture backend for the current platform.
pub fn create_capture() -> PlatformCapture {
    let capture = PlatformCapture::new();
    events::log_backend_selected(capture.backend_name());
    capture
}
