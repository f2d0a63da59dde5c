use std::sync::Mutex;

use image::RgbaImage;
use tracing::debug;

use super::errors::CaptureError;
use super::traits::WindowCapture;
use super::types::CaptureOptions;
use crate::window::WindowInfo;

/// Shares one backend across threads by running one call at a time.
///
/// Native capture resources are not assumed to be thread-safe, so every
/// trait call holds the lock for its full duration.
pub struct SerializedCapture<C> {
    inner: Mutex<C>,
}

impl<C: WindowCapture> SerializedCapture<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    pub fn into_inner(self) -> C {
        self.inner.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn with<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        // A panic inside a backend call leaves no partial state behind
        let guard = self.inner.lock().unwrap_or_else(|e| {
            debug!(event = "core.capture.lock_poison_recovered");
            e.into_inner()
        });
        f(&*guard)
    }
}

impl<C: WindowCapture> WindowCapture for SerializedCapture<C> {
    fn backend_name(&self) -> &'static str {
        self.with(|c| c.backend_name())
    }

    fn list_windows(&self) -> Result<Vec<WindowInfo>, CaptureError> {
        self.with(|c| c.list_windows())
    }

    fn capture_window(
        &self,
        window: &WindowInfo,
        options: CaptureOptions,
    ) -> Result<RgbaImage, CaptureError> {
        self.with(|c| c.capture_window(window, options))
    }

    fn capture_window_by_title(
        &self,
        contains: &str,
        options: CaptureOptions,
    ) -> Result<RgbaImage, CaptureError> {
        // Enumeration and capture happen under one lock
        self.with(|c| c.capture_window_by_title(contains, options))
    }
}
