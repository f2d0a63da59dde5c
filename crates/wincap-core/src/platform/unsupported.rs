use image::RgbaImage;
use tracing::warn;

use crate::capture::{CaptureError, CaptureOptions, WindowCapture};
use crate::window::WindowInfo;

/// Backend for platforms without a native capture implementation.
///
/// Every operation fails with `NotImplemented`.
#[derive(Debug, Default)]
pub struct UnsupportedCapture;

impl UnsupportedCapture {
    pub fn new() -> Self {
        Self
    }

    fn not_implemented(&self, operation: &'static str) -> CaptureError {
        warn!(
            event = "core.platform.not_implemented",
            platform = std::env::consts::OS,
            operation = operation
        );
        CaptureError::NotImplemented {
            platform: std::env::consts::OS,
        }
    }
}

impl WindowCapture for UnsupportedCapture {
    fn backend_name(&self) -> &'static str {
        "unsupported"
    }

    fn list_windows(&self) -> Result<Vec<WindowInfo>, CaptureError> {
        Err(self.not_implemented("list_windows"))
    }

    fn capture_window(
        &self,
        _window: &WindowInfo,
        _options: CaptureOptions,
    ) -> Result<RgbaImage, CaptureError> {
        Err(self.not_implemented("capture_window"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowId;

    #[test]
    fn test_list_windows_not_implemented() {
        let capture = UnsupportedCapture::new();
        let err = capture.list_windows().unwrap_err();
        assert!(matches!(err, CaptureError::NotImplemented { platform } if platform == std::env::consts::OS));
    }

    #[test]
    fn test_capture_window_not_implemented() {
        let capture = UnsupportedCapture::new();
        let window = WindowInfo::new(WindowId::new(1), "Terminal", 10, 10);
        let err = capture
            .capture_window(&window, CaptureOptions::FULL_WINDOW)
            .unwrap_err();
        assert!(matches!(err, CaptureError::NotImplemented { .. }));
    }

    #[test]
    fn test_capture_by_title_degrades_to_not_found() {
        let capture = UnsupportedCapture::new();
        let err = capture
            .capture_window_by_title("terminal", CaptureOptions::FULL_WINDOW)
            .unwrap_err();
        assert!(matches!(err, CaptureError::WindowNotFound { .. }));
    }
}
