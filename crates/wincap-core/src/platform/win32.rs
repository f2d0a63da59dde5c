//! Win32 GDI backend.

use std::ffi::c_void;

use image::RgbaImage;
use tracing::{debug, info, warn};
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, RECT, TRUE};
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BitBlt, CreateCompatibleBitmap, CreateCompatibleDC,
    DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDIBits, GetWindowDC, HGDI_ERROR, HGDIOBJ, ReleaseDC,
    SRCCOPY, SelectObject,
};
use windows::Win32::System::Memory::{GMEM_MOVEABLE, GlobalAlloc, GlobalFree, GlobalLock, GlobalUnlock};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetSystemMetrics, GetWindowRect, GetWindowTextW, SM_CXPADDEDBORDER, SM_CYCAPTION,
    SM_CYFRAME,
};

use super::resource::Scoped;
use crate::capture::{
    CaptureError, CaptureOptions, PixelLayout, WindowCapture, crop_exceeds_window, dib_buffer_len,
    normalize,
};
use crate::window::{WindowId, WindowInfo};

/// UTF-16 units read per window title.
const TITLE_CAPACITY: usize = 256;
const BITS_PER_PIXEL: u16 = 32;

/// Window capture through GDI device contexts and DIB transfer.
#[derive(Debug, Default)]
pub struct GdiCapture {
    _private: (),
}

impl GdiCapture {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

fn hwnd_to_id(hwnd: HWND) -> WindowId {
    WindowId::new(hwnd.0 as usize as u64)
}

fn id_to_hwnd(id: WindowId) -> HWND {
    HWND(id.raw() as usize as *mut c_void)
}

/// Height of the standard caption plus sizing frame, measured from the top
/// of the window rect.
fn title_bar_height() -> u32 {
    // SAFETY: GetSystemMetrics has no preconditions.
    let height = unsafe {
        GetSystemMetrics(SM_CYCAPTION) + GetSystemMetrics(SM_CYFRAME) + GetSystemMetrics(SM_CXPADDEDBORDER)
    };
    height.max(0) as u32
}

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam carries the &mut Vec handed to EnumWindows by
    // list_windows, which outlives the enumeration.
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<WindowInfo>) };

    let mut buffer = [0u16; TITLE_CAPACITY];
    // SAFETY: buffer is a valid writable slice.
    let len = unsafe { GetWindowTextW(hwnd, &mut buffer) };
    if len <= 0 {
        return TRUE;
    }
    let title = String::from_utf16_lossy(&buffer[..len as usize]);

    let mut rect = RECT::default();
    // SAFETY: rect is a valid out pointer.
    if let Err(e) = unsafe { GetWindowRect(hwnd, &mut rect) } {
        debug!(
            event = "core.window.rect_unavailable",
            id = %hwnd_to_id(hwnd),
            error = %e
        );
        return TRUE;
    }

    let width = (rect.right - rect.left).max(0) as u32;
    let height = (rect.bottom - rect.top).max(0) as u32;
    windows.push(WindowInfo::new(hwnd_to_id(hwnd), title, width, height));
    TRUE
}

impl WindowCapture for GdiCapture {
    fn backend_name(&self) -> &'static str {
        "gdi"
    }

    fn list_windows(&self) -> Result<Vec<WindowInfo>, CaptureError> {
        info!(event = "core.window.list_started", backend = self.backend_name());

        let mut windows: Vec<WindowInfo> = Vec::new();
        // SAFETY: the callback only touches the Vec behind lparam, and
        // EnumWindows returns before `windows` goes out of scope.
        unsafe {
            EnumWindows(
                Some(collect_window),
                LPARAM(&mut windows as *mut Vec<WindowInfo> as isize),
            )
        }
        .map_err(|e| CaptureError::EnumerationFailed {
            message: e.to_string(),
        })?;

        info!(event = "core.window.list_completed", count = windows.len());
        Ok(windows)
    }

    fn capture_window(
        &self,
        window: &WindowInfo,
        options: CaptureOptions,
    ) -> Result<RgbaImage, CaptureError> {
        let (width, height) = (window.width(), window.height());
        info!(
            event = "core.capture.window_started",
            backend = self.backend_name(),
            id = %window.id(),
            width = width,
            height = height,
            options = %options
        );

        let (Ok(cx), Ok(cy)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(CaptureError::InvalidDimensions { width, height });
        };
        if cx == 0 || cy == 0 {
            return Err(CaptureError::InvalidDimensions { width, height });
        }

        let offset = options.title_offset(title_bar_height());
        if crop_exceeds_window(height, offset) {
            warn!(
                event = "core.capture.crop_exceeds_window",
                id = %window.id(),
                height = height,
                offset = offset
            );
        }

        let hwnd = id_to_hwnd(window.id());

        // The window DC covers the whole window rect, caption and frame
        // included, so its origin matches the enumerated width and height and
        // the title offset skips the real title bar.
        // SAFETY: every handle below is checked by Scoped before use and
        // released by its guard in reverse order of acquisition.
        let window_dc = Scoped::acquire(
            unsafe { GetWindowDC(hwnd) },
            "window device context",
            |dc| !dc.is_invalid(),
            |dc| unsafe {
                ReleaseDC(hwnd, dc);
            },
        )?;

        let memory_dc = Scoped::acquire(
            unsafe { CreateCompatibleDC(window_dc.get()) },
            "memory device context",
            |dc| !dc.is_invalid(),
            |dc| unsafe {
                let _ = DeleteDC(dc);
            },
        )?;

        let bitmap = Scoped::acquire(
            unsafe { CreateCompatibleBitmap(window_dc.get(), cx, cy) },
            "compatible bitmap",
            |bitmap| !bitmap.is_invalid(),
            |bitmap| unsafe {
                let _ = DeleteObject(HGDIOBJ(bitmap.0));
            },
        )?;

        let mut info = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: cx,
                // Negative height requests a top-down DIB
                biHeight: -cy,
                biPlanes: 1,
                biBitCount: BITS_PER_PIXEL,
                biCompression: BI_RGB.0,
                biSizeImage: 0,
                ..Default::default()
            },
            ..Default::default()
        };

        let data_len = dib_buffer_len(width, height, u32::from(BITS_PER_PIXEL));
        let memory = unsafe { GlobalAlloc(GMEM_MOVEABLE, data_len) }.map_err(|e| {
            debug!(event = "core.capture.global_alloc_failed", error = %e);
            CaptureError::ResourceCreationFailed {
                resource: "memory block",
            }
        })?;
        let memory = Scoped::acquire(
            memory,
            "memory block",
            |_| true,
            |memory| unsafe {
                let _ = GlobalFree(memory);
            },
        )?;
        let data = Scoped::acquire(
            unsafe { GlobalLock(memory.get()) },
            "locked memory block",
            |ptr| !ptr.is_null(),
            |_| unsafe {
                let _ = GlobalUnlock(memory.get());
            },
        )?;

        let selection = Scoped::acquire(
            unsafe { SelectObject(memory_dc.get(), HGDIOBJ(bitmap.get().0)) },
            "bitmap selection",
            |previous| !previous.is_invalid() && previous.0 != HGDI_ERROR.0,
            |previous| unsafe {
                let _ = SelectObject(memory_dc.get(), previous);
            },
        )
        .map_err(|_| CaptureError::TransferFailed {
            operation: "SelectObject",
        })?;

        unsafe {
            BitBlt(
                memory_dc.get(),
                0,
                0,
                cx,
                cy,
                window_dc.get(),
                0,
                offset as i32,
                SRCCOPY,
            )
        }
        .map_err(|e| {
            debug!(event = "core.capture.bitblt_failed", error = %e);
            CaptureError::TransferFailed { operation: "BitBlt" }
        })?;

        // GetDIBits requires the bitmap not to be selected into any DC
        drop(selection);

        let lines = unsafe {
            GetDIBits(
                window_dc.get(),
                bitmap.get(),
                0,
                height,
                Some(data.get()),
                &mut info,
                DIB_RGB_COLORS,
            )
        };
        if lines == 0 {
            return Err(CaptureError::TransferFailed {
                operation: "GetDIBits",
            });
        }

        // SAFETY: the locked block holds data_len bytes and stays locked
        // until `data` is dropped at the end of this function.
        let pixels = unsafe { std::slice::from_raw_parts(data.get() as *const u8, data_len) };
        let stride = data_len / height as usize;
        let image = normalize(pixels, width, height, stride, PixelLayout::Bgrx)?;

        info!(
            event = "core.capture.window_completed",
            id = %window.id(),
            width = width,
            height = height
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hwnd_round_trip() {
        let id = WindowId::new(0x0001_02A4);
        assert_eq!(hwnd_to_id(id_to_hwnd(id)), id);
    }

    #[test]
    fn test_title_bar_height_positive() {
        assert!(title_bar_height() > 0);
    }

    #[test]
    fn test_crop_offset_is_title_bar_height() {
        let height = title_bar_height();
        assert_eq!(CaptureOptions::FULL_WINDOW.title_offset(height), 0);
        assert_eq!(CaptureOptions::CROP_TITLE.title_offset(height), height);
        assert!(crop_exceeds_window(height, CaptureOptions::CROP_TITLE.title_offset(height)));
        assert!(!crop_exceeds_window(height + 1, CaptureOptions::CROP_TITLE.title_offset(height)));
    }

    #[test]
    fn test_capture_zero_area_window_rejected() {
        let capture = GdiCapture::new();
        let window = WindowInfo::new(WindowId::new(1), "Hidden", 0, 40);
        let err = capture
            .capture_window(&window, CaptureOptions::FULL_WINDOW)
            .unwrap_err();
        assert!(matches!(err, CaptureError::InvalidDimensions { .. }));
    }
}
