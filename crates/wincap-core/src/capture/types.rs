use std::fmt;
use std::ops::BitOr;

/// Capture behavior flags.
///
/// Exactly one flag is meaningful per call: `FULL_WINDOW` (no bits set)
/// or `CROP_TITLE` (first bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CaptureOptions(u32);

impl CaptureOptions {
    /// Capture the whole window, no cropping.
    pub const FULL_WINDOW: CaptureOptions = CaptureOptions(0);
    /// Exclude a fixed-height title-bar region from the top of the image.
    pub const CROP_TITLE: CaptureOptions = CaptureOptions(1);

    const KNOWN_BITS: u32 = Self::CROP_TITLE.0;

    /// Build options from raw bits, dropping bits that have no meaning.
    pub fn from_bits(bits: u32) -> Self {
        Self(bits & Self::KNOWN_BITS)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, other: CaptureOptions) -> bool {
        self.0 & other.0 == other.0
    }

    /// Number of source rows a backend skips at the top of the window.
    ///
    /// The destination bitmap keeps the window's full size either way. When
    /// the window is not taller than `title_bar_height` the visible region is
    /// undefined and the caller is responsible.
    pub fn title_offset(&self, title_bar_height: u32) -> u32 {
        if self.contains(Self::CROP_TITLE) {
            title_bar_height
        } else {
            0
        }
    }
}

/// Whether a title offset hides the whole window.
///
/// Backends still capture in that case: the bitmap keeps the window's full
/// size and rows past the end of the source are unspecified.
pub fn crop_exceeds_window(height: u32, offset: u32) -> bool {
    offset > 0 && height <= offset
}

impl BitOr for CaptureOptions {
    type Output = CaptureOptions;

    fn bitor(self, rhs: Self) -> Self::Output {
        CaptureOptions(self.0 | rhs.0)
    }
}

impl fmt::Display for CaptureOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(Self::CROP_TITLE) {
            write!(f, "crop_title")
        } else {
            write!(f, "full_window")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_values() {
        assert_eq!(CaptureOptions::FULL_WINDOW.bits(), 0);
        assert_eq!(CaptureOptions::CROP_TITLE.bits(), 1);
        assert_eq!(CaptureOptions::default(), CaptureOptions::FULL_WINDOW);
    }

    #[test]
    fn test_contains() {
        assert!(CaptureOptions::CROP_TITLE.contains(CaptureOptions::CROP_TITLE));
        assert!(!CaptureOptions::FULL_WINDOW.contains(CaptureOptions::CROP_TITLE));
        // Every value contains the empty flag set
        assert!(CaptureOptions::CROP_TITLE.contains(CaptureOptions::FULL_WINDOW));
    }

    #[test]
    fn test_from_bits_drops_unknown_bits() {
        assert_eq!(CaptureOptions::from_bits(0b110), CaptureOptions::FULL_WINDOW);
        assert_eq!(CaptureOptions::from_bits(0b111), CaptureOptions::CROP_TITLE);
    }

    #[test]
    fn test_title_offset() {
        assert_eq!(CaptureOptions::FULL_WINDOW.title_offset(29), 0);
        assert_eq!(CaptureOptions::CROP_TITLE.title_offset(29), 29);
    }

    #[test]
    fn test_crop_exceeds_window() {
        // Full window never exceeds, even for a 1px tall window
        assert!(!crop_exceeds_window(1, CaptureOptions::FULL_WINDOW.title_offset(29)));
        assert!(!crop_exceeds_window(600, CaptureOptions::CROP_TITLE.title_offset(29)));
        assert!(!crop_exceeds_window(30, 29));
        assert!(crop_exceeds_window(29, 29));
        assert!(crop_exceeds_window(10, 29));
    }

    #[test]
    fn test_bitor() {
        let options = CaptureOptions::FULL_WINDOW | CaptureOptions::CROP_TITLE;
        assert_eq!(options, CaptureOptions::CROP_TITLE);
    }

    #[test]
    fn test_display() {
        assert_eq!(CaptureOptions::FULL_WINDOW.to_string(), "full_window");
        assert_eq!(CaptureOptions::CROP_TITLE.to_string(), "crop_title");
    }
}
