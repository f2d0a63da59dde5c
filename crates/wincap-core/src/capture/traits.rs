//! Capture service trait definition.

use image::RgbaImage;

use super::errors::CaptureError;
use super::search;
use super::types::CaptureOptions;
use crate::window::WindowInfo;

/// Trait defining the capture service every platform backend satisfies.
///
/// Calls are synchronous and block for the duration of the native calls.
/// A single instance is not guaranteed to be safe under concurrent capture
/// calls; wrap it in [`super::SerializedCapture`] to share it across threads.
pub trait WindowCapture {
    /// Canonical name of this backend (e.g., "coregraphics", "gdi").
    fn backend_name(&self) -> &'static str;

    /// Enumerate the top-level windows visible to the backend right now.
    ///
    /// Order is whatever the native enumeration produces.
    fn list_windows(&self) -> Result<Vec<WindowInfo>, CaptureError>;

    /// Capture one window as an RGBA bitmap.
    ///
    /// `window` must come from a recent `list_windows` call on this same
    /// instance. On success the bitmap is exactly `window.width()` by
    /// `window.height()` with straight (not premultiplied) alpha. A failed
    /// capture returns no image at all.
    fn capture_window(
        &self,
        window: &WindowInfo,
        options: CaptureOptions,
    ) -> Result<RgbaImage, CaptureError>;

    /// Capture the first window whose title contains `contains`.
    ///
    /// See [`search::capture_by_title`] for the matching policy.
    fn capture_window_by_title(
        &self,
        contains: &str,
        options: CaptureOptions,
    ) -> Result<RgbaImage, CaptureError> {
        search::capture_by_title(self, contains, options)
    }
}
