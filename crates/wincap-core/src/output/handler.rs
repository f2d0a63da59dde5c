use std::fs;
use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use image::RgbaImage;
use image::codecs::jpeg::JpegEncoder;
use tracing::info;

use super::errors::OutputError;
use super::types::ImageFormat;

/// Encode a captured bitmap into the bytes of an image file.
pub fn encode(image: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>, OutputError> {
    let mut bytes = Vec::new();
    match format {
        ImageFormat::Png => {
            image
                .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
                .map_err(|source| OutputError::EncodeFailed {
                    format: "png",
                    source,
                })?;
        }
        ImageFormat::Jpeg { quality } => {
            // JPEG has no alpha channel
            let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, quality)
                .encode_image(&rgb)
                .map_err(|source| OutputError::EncodeFailed {
                    format: "jpeg",
                    source,
                })?;
        }
    }
    Ok(bytes)
}

/// Encode and write a captured bitmap, creating parent directories.
pub fn save_to_file(image: &RgbaImage, path: &Path, format: ImageFormat) -> Result<(), OutputError> {
    let bytes = encode(image, format)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::DirectoryCreationFailed {
            path: parent.display().to_string(),
            source,
        })?;
    }

    fs::write(path, &bytes).map_err(|source| OutputError::WriteFailed {
        path: path.display().to_string(),
        source,
    })?;

    info!(
        event = "core.output.save_completed",
        path = %path.display(),
        format = %format,
        bytes = bytes.len()
    );
    Ok(())
}

/// Encode a captured bitmap and return it as standard base64.
pub fn to_base64(image: &RgbaImage, format: ImageFormat) -> Result<String, OutputError> {
    let bytes = encode(image, format)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// Timestamped file name, e.g. `capture-20260101-093000.png`.
pub fn default_file_name(format: ImageFormat) -> String {
    format!(
        "capture-{}.{}",
        chrono::Local::now().format("%Y%m%d-%H%M%S"),
        format.extension()
    )
}
