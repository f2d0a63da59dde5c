//! Conversion of native 32-bit pixel buffers into RGBA bitmaps.

use image::RgbaImage;

use super::errors::CaptureError;

/// Byte order of one 4-byte pixel in a native buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// A, R, G, B in memory with premultiplied color. Alpha is taken from
    /// the source and color is converted back to straight alpha.
    Argb,
    /// B, G, R, unused in memory. Alpha is forced to fully opaque.
    Bgrx,
}

impl PixelLayout {
    fn to_rgba(self, px: &[u8]) -> [u8; 4] {
        match self {
            PixelLayout::Argb => {
                let a = px[0];
                [
                    unpremultiply(px[1], a),
                    unpremultiply(px[2], a),
                    unpremultiply(px[3], a),
                    a,
                ]
            }
            PixelLayout::Bgrx => [px[2], px[1], px[0], 0xFF],
        }
    }
}

/// Undo alpha premultiplication of one color channel, rounding to nearest.
///
/// Fully transparent and fully opaque pixels pass through. Channels brighter
/// than their alpha saturate at 255.
fn unpremultiply(channel: u8, alpha: u8) -> u8 {
    match alpha {
        0 | 0xFF => channel,
        _ => {
            let (c, a) = (u16::from(channel), u16::from(alpha));
            ((c * 255 + a / 2) / a).min(255) as u8
        }
    }
}

/// Size in bytes of a bottom-up or top-down DIB with DWORD-aligned rows.
pub fn dib_buffer_len(width: u32, height: u32, bits_per_pixel: u32) -> usize {
    let row = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    row * height as usize
}

/// Convert `height` rows of `stride` bytes into a tightly packed RGBA image.
///
/// Every source row must hold at least `width * 4` bytes. Padding past that
/// is ignored.
pub fn normalize(
    src: &[u8],
    width: u32,
    height: u32,
    stride: usize,
    layout: PixelLayout,
) -> Result<RgbaImage, CaptureError> {
    if width == 0 || height == 0 {
        return Err(CaptureError::InvalidDimensions { width, height });
    }

    let row_bytes = width as usize * 4;
    if stride < row_bytes {
        return Err(CaptureError::InvalidDimensions { width, height });
    }

    let expected = stride * (height as usize - 1) + row_bytes;
    if src.len() < expected {
        return Err(CaptureError::PixelBufferTooSmall {
            expected,
            actual: src.len(),
        });
    }

    let mut out = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * stride;
        for px in src[start..start + row_bytes].chunks_exact(4) {
            out.extend_from_slice(&layout.to_rgba(px));
        }
    }

    RgbaImage::from_raw(width, height, out)
        .ok_or(CaptureError::InvalidDimensions { width, height })
}
