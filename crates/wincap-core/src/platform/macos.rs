//! CoreGraphics backend.

use std::ffi::c_void;

use core_foundation::array::{CFArray, CFArrayRef};
use core_foundation::base::{CFType, CFTypeRef, TCFType};
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::string::{CFString, CFStringRef};
use core_graphics::base::{CGFloat, kCGBitmapByteOrder32Big, kCGImageAlphaPremultipliedFirst};
use core_graphics::color_space::kCGColorSpaceSRGB;
use core_graphics::geometry::{CGPoint, CGRect, CGSize};
use core_graphics::sys::{CGColorSpaceRef, CGContextRef, CGImageRef};
use core_graphics::window::{
    CGWindowID, CGWindowImageOption, CGWindowListOption, kCGNullWindowID, kCGWindowBounds,
    kCGWindowImageBoundsIgnoreFraming, kCGWindowListExcludeDesktopElements,
    kCGWindowListOptionAll, kCGWindowListOptionIncludingWindow, kCGWindowName, kCGWindowNumber,
};
use image::RgbaImage;
use tracing::{debug, info, warn};

use super::resource::Scoped;
use crate::capture::{
    CaptureError, CaptureOptions, PixelLayout, WindowCapture, crop_exceeds_window, normalize,
};
use crate::window::{WindowId, WindowInfo};

/// Rows skipped from the top of the window for `CROP_TITLE`.
const TITLE_BAR_HEIGHT: u32 = 29;

// SAFETY: FFI declarations for CoreGraphics window list and bitmap functions.
// Create/Copy functions return +1 references (or null) that the caller must
// release with the matching Release function.
#[link(name = "CoreGraphics", kind = "framework")]
unsafe extern "C" {
    static CGRectNull: CGRect;

    fn CGRequestScreenCaptureAccess() -> bool;
    fn CGWindowListCopyWindowInfo(option: CGWindowListOption, relative_to: CGWindowID)
    -> CFArrayRef;
    fn CGWindowListCreateImage(
        bounds: CGRect,
        option: CGWindowListOption,
        window: CGWindowID,
        image_option: CGWindowImageOption,
    ) -> CGImageRef;
    fn CGImageRelease(image: CGImageRef);
    fn CGColorSpaceCreateWithName(name: CFStringRef) -> CGColorSpaceRef;
    fn CGColorSpaceRelease(space: CGColorSpaceRef);
    fn CGBitmapContextCreate(
        data: *mut c_void,
        width: usize,
        height: usize,
        bits_per_component: usize,
        bytes_per_row: usize,
        space: CGColorSpaceRef,
        bitmap_info: u32,
    ) -> CGContextRef;
    fn CGContextRelease(context: CGContextRef);
    fn CGContextDrawImage(context: CGContextRef, rect: CGRect, image: CGImageRef);
}

/// Window capture through the CoreGraphics window list API.
#[derive(Debug)]
pub struct MacCapture {
    _private: (),
}

impl Default for MacCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl MacCapture {
    /// Create the backend, prompting for screen recording access if needed.
    ///
    /// A denied prompt is not an error here. Captures of other applications'
    /// windows will come back blank or fail until access is granted.
    pub fn new() -> Self {
        // SAFETY: no arguments, returns the current authorization state.
        let granted = unsafe { CGRequestScreenCaptureAccess() };
        if !granted {
            warn!(event = "core.platform.screen_capture_access_denied");
        }
        Self { _private: () }
    }
}

impl WindowCapture for MacCapture {
    fn backend_name(&self) -> &'static str {
        "coregraphics"
    }

    fn list_windows(&self) -> Result<Vec<WindowInfo>, CaptureError> {
        info!(event = "core.window.list_started", backend = self.backend_name());

        // SAFETY: returns a +1 array or null.
        let raw = unsafe {
            CGWindowListCopyWindowInfo(
                kCGWindowListOptionAll | kCGWindowListExcludeDesktopElements,
                kCGNullWindowID,
            )
        };
        if raw.is_null() {
            return Err(CaptureError::EnumerationFailed {
                message: "CGWindowListCopyWindowInfo returned null".to_string(),
            });
        }
        // SAFETY: raw is non-null and we own the reference from the Copy call.
        let descriptors: CFArray<CFType> = unsafe { CFArray::wrap_under_create_rule(raw) };

        let mut windows = Vec::with_capacity(descriptors.len() as usize);
        for descriptor in descriptors.iter() {
            windows.push(decode_descriptor(&descriptor)?);
        }

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

        if width == 0 || height == 0 {
            return Err(CaptureError::InvalidDimensions { width, height });
        }
        let window_id =
            CGWindowID::try_from(window.id().raw()).map_err(|_| CaptureError::ConversionFailed {
                reason: format!("window id {} does not fit a CGWindowID", window.id()),
            })?;

        let offset = options.title_offset(TITLE_BAR_HEIGHT);
        if crop_exceeds_window(height, offset) {
            warn!(
                event = "core.capture.crop_exceeds_window",
                id = %window.id(),
                height = height,
                offset = offset
            );
        }

        // SAFETY: kCGColorSpaceSRGB is a valid constant name; returns +1 or null.
        let color_space = Scoped::acquire(
            unsafe { CGColorSpaceCreateWithName(kCGColorSpaceSRGB) },
            "color space",
            |space| !space.is_null(),
            |space| unsafe { CGColorSpaceRelease(space) },
        )?;

        // SAFETY: CGRectNull asks for the window's own bounds; returns +1 or null.
        let image = Scoped::acquire(
            unsafe {
                CGWindowListCreateImage(
                    CGRectNull,
                    kCGWindowListOptionIncludingWindow,
                    window_id,
                    kCGWindowImageBoundsIgnoreFraming,
                )
            },
            "window image",
            |image| !image.is_null(),
            |image| unsafe { CGImageRelease(image) },
        )
        .map_err(|_| CaptureError::WindowUnavailable { id: window.id() })?;

        let stride = width as usize * 4;
        let mut buffer = vec![0u8; stride * height as usize];

        // SAFETY: buffer holds stride * height bytes and outlives the context,
        // which is released before the buffer is read.
        let context = Scoped::acquire(
            unsafe {
                CGBitmapContextCreate(
                    buffer.as_mut_ptr().cast(),
                    width as usize,
                    height as usize,
                    8,
                    stride,
                    color_space.get(),
                    kCGImageAlphaPremultipliedFirst | kCGBitmapByteOrder32Big,
                )
            },
            "bitmap context",
            |context| !context.is_null(),
            |context| unsafe { CGContextRelease(context) },
        )?;

        let rect = crop_draw_rect(width, height, offset);
        // SAFETY: context and image are live for this call.
        unsafe { CGContextDrawImage(context.get(), rect, image.get()) };
        drop(context);

        let bitmap = normalize(&buffer, width, height, stride, PixelLayout::Argb)?;

        info!(
            event = "core.capture.window_completed",
            id = %window.id(),
            width = width,
            height = height
        );
        Ok(bitmap)
    }
}

/// Where the window image is drawn inside a `width` x `height` bitmap.
///
/// Drawing origin is bottom-left, so a positive y pushes the top `offset`
/// rows of the image out of the bitmap. The rect keeps the window's size.
fn crop_draw_rect(width: u32, height: u32, offset: u32) -> CGRect {
    CGRect::new(
        &CGPoint::new(0.0, offset as CGFloat),
        &CGSize::new(width as CGFloat, height as CGFloat),
    )
}

/// Decode one window list entry into a `WindowInfo`.
///
/// A missing name yields an empty title and missing bounds yield 0x0. A
/// missing window number or malformed bounds fail the conversion.
fn decode_descriptor(descriptor: &CFType) -> Result<WindowInfo, CaptureError> {
    let dict = as_dictionary(descriptor).ok_or_else(|| CaptureError::ConversionFailed {
        reason: "window descriptor is not a dictionary".to_string(),
    })?;

    // SAFETY: the window list keys are immutable framework constants.
    let (number_key, name_key, bounds_key) =
        unsafe { (kCGWindowNumber, kCGWindowName, kCGWindowBounds) };

    let number = lookup(&dict, number_key)
        .and_then(|value| value.downcast::<CFNumber>())
        .and_then(|number| number.to_i64())
        .and_then(|number| u64::try_from(number).ok())
        .ok_or_else(|| CaptureError::ConversionFailed {
            reason: "window descriptor has no valid window number".to_string(),
        })?;

    let title = lookup(&dict, name_key)
        .and_then(|value| value.downcast::<CFString>())
        .map(|name| name.to_string())
        .unwrap_or_default();

    let (width, height) = match lookup(&dict, bounds_key) {
        None => {
            debug!(event = "core.window.bounds_missing", id = number);
            (0, 0)
        }
        Some(value) => {
            let rect = as_dictionary(&value)
                .and_then(|bounds| CGRect::from_dict_representation(&bounds))
                .ok_or_else(|| CaptureError::ConversionFailed {
                    reason: format!("window {number} has malformed bounds"),
                })?;
            (rect.size.width as u32, rect.size.height as u32)
        }
    };

    Ok(WindowInfo::new(WindowId::new(number), title, width, height))
}

fn as_dictionary(value: &CFType) -> Option<CFDictionary> {
    if value.type_of() != <CFDictionary as TCFType>::type_id() {
        return None;
    }
    // SAFETY: the type id was checked above; the get rule retains the value.
    Some(unsafe { CFDictionary::wrap_under_get_rule(value.as_CFTypeRef() as CFDictionaryRef) })
}

fn lookup(dict: &CFDictionary, key: CFStringRef) -> Option<CFType> {
    dict.find(key as *const c_void)
        // SAFETY: dictionary values are CF objects; the get rule retains them.
        .map(|value| unsafe { CFType::wrap_under_get_rule(*value as CFTypeRef) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_foundation::boolean::CFBoolean;

    fn key(raw: CFStringRef) -> CFString {
        unsafe { CFString::wrap_under_get_rule(raw) }
    }

    fn bounds(width: f64, height: f64) -> CFType {
        let rect = CFDictionary::from_CFType_pairs(&[
            (CFString::new("X"), CFNumber::from(10.0).as_CFType()),
            (CFString::new("Y"), CFNumber::from(20.0).as_CFType()),
            (CFString::new("Width"), CFNumber::from(width).as_CFType()),
            (CFString::new("Height"), CFNumber::from(height).as_CFType()),
        ]);
        rect.as_CFType()
    }

    fn descriptor(pairs: Vec<(CFString, CFType)>) -> CFType {
        CFDictionary::from_CFType_pairs(&pairs).as_CFType()
    }

    #[test]
    fn test_draw_rect_full_window() {
        let offset = CaptureOptions::FULL_WINDOW.title_offset(TITLE_BAR_HEIGHT);
        let rect = crop_draw_rect(800, 600, offset);
        assert_eq!(rect.origin.x, 0.0);
        assert_eq!(rect.origin.y, 0.0);
        assert_eq!((rect.size.width, rect.size.height), (800.0, 600.0));
    }

    #[test]
    fn test_draw_rect_crop_title() {
        let offset = CaptureOptions::CROP_TITLE.title_offset(TITLE_BAR_HEIGHT);
        let rect = crop_draw_rect(800, 600, offset);
        assert_eq!(rect.origin.y, 29.0);
        assert_eq!((rect.size.width, rect.size.height), (800.0, 600.0));
    }

    #[test]
    fn test_draw_rect_window_shorter_than_title_bar_keeps_size() {
        let offset = CaptureOptions::CROP_TITLE.title_offset(TITLE_BAR_HEIGHT);
        assert!(crop_exceeds_window(20, offset));

        let rect = crop_draw_rect(300, 20, offset);
        assert_eq!(rect.origin.y, 29.0);
        assert_eq!((rect.size.width, rect.size.height), (300.0, 20.0));
    }

    #[test]
    fn test_decode_full_descriptor() {
        let entry = descriptor(vec![
            (key(unsafe { kCGWindowNumber }), CFNumber::from(42).as_CFType()),
            (key(unsafe { kCGWindowName }), CFString::new("Terminal — bash").as_CFType()),
            (key(unsafe { kCGWindowBounds }), bounds(800.0, 600.0)),
        ]);

        let window = decode_descriptor(&entry).unwrap();
        assert_eq!(window.id().raw(), 42);
        assert_eq!(window.title(), "Terminal — bash");
        assert_eq!((window.width(), window.height()), (800, 600));
    }

    #[test]
    fn test_decode_missing_name_gives_empty_title() {
        let entry = descriptor(vec![
            (key(unsafe { kCGWindowNumber }), CFNumber::from(7).as_CFType()),
            (key(unsafe { kCGWindowBounds }), bounds(10.0, 10.0)),
        ]);
        assert_eq!(decode_descriptor(&entry).unwrap().title(), "");
    }

    #[test]
    fn test_decode_missing_bounds_gives_zero_size() {
        let entry = descriptor(vec![(
            key(unsafe { kCGWindowNumber }),
            CFNumber::from(7).as_CFType(),
        )]);
        let window = decode_descriptor(&entry).unwrap();
        assert_eq!((window.width(), window.height()), (0, 0));
    }

    #[test]
    fn test_decode_missing_number_fails() {
        let entry = descriptor(vec![(
            key(unsafe { kCGWindowName }),
            CFString::new("Orphan").as_CFType(),
        )]);
        assert!(matches!(
            decode_descriptor(&entry),
            Err(CaptureError::ConversionFailed { .. })
        ));
    }

    #[test]
    fn test_decode_malformed_bounds_fails() {
        let entry = descriptor(vec![
            (key(unsafe { kCGWindowNumber }), CFNumber::from(7).as_CFType()),
            (key(unsafe { kCGWindowBounds }), CFBoolean::true_value().as_CFType()),
        ]);
        assert!(matches!(
            decode_descriptor(&entry),
            Err(CaptureError::ConversionFailed { .. })
        ));
    }

    #[test]
    fn test_decode_non_dictionary_fails() {
        let entry = CFString::new("not a window").as_CFType();
        assert!(matches!(
            decode_descriptor(&entry),
            Err(CaptureError::ConversionFailed { .. })
        ));
    }

    #[test]
    fn test_capture_zero_area_window_rejected() {
        let capture = MacCapture { _private: () };
        let window = WindowInfo::new(WindowId::new(1), "Hidden", 0, 0);
        let err = capture
            .capture_window(&window, CaptureOptions::FULL_WINDOW)
            .unwrap_err();
        assert!(matches!(err, CaptureError::InvalidDimensions { .. }));
    }
}
