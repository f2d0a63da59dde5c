use crate::errors::WincapError;
use crate::window::WindowId;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Failed to enumerate windows: {message}")]
    EnumerationFailed { message: String },

    #[error("Cannot convert window descriptor: {reason}")]
    ConversionFailed { reason: String },

    #[error("Cannot capture window {id}: window is gone or not capturable")]
    WindowUnavailable { id: WindowId },

    #[error("Cannot create {resource}")]
    ResourceCreationFailed { resource: &'static str },

    #[error("{operation} failed")]
    TransferFailed { operation: &'static str },

    #[error("Pixel buffer too small: expected at least {expected} bytes, got {actual}")]
    PixelBufferTooSmall { expected: usize, actual: usize },

    #[error("Invalid capture dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("no window title containing \"{title}\" found")]
    WindowNotFound { title: String },

    #[error("no window with id {id} found")]
    WindowNotFoundById { id: WindowId },

    #[error("Window capture is not implemented on {platform}")]
    NotImplemented { platform: &'static str },
}

impl WincapError for CaptureError {
    fn error_code(&self) -> &'static str {
        match self {
            CaptureError::EnumerationFailed { .. } => "ENUMERATION_FAILED",
            CaptureError::ConversionFailed { .. } => "CONVERSION_FAILED",
            CaptureError::WindowUnavailable { .. } => "WINDOW_UNAVAILABLE",
            CaptureError::ResourceCreationFailed { .. } => "RESOURCE_CREATION_FAILED",
            CaptureError::TransferFailed { .. } => "TRANSFER_FAILED",
            CaptureError::PixelBufferTooSmall { .. } => "PIXEL_BUFFER_TOO_SMALL",
            CaptureError::InvalidDimensions { .. } => "INVALID_DIMENSIONS",
            CaptureError::WindowNotFound { .. } => "WINDOW_NOT_FOUND",
            CaptureError::WindowNotFoundById { .. } => "WINDOW_NOT_FOUND_BY_ID",
            CaptureError::NotImplemented { .. } => "NOT_IMPLEMENTED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            CaptureError::WindowNotFound { .. }
                | CaptureError::WindowNotFoundById { .. }
                | CaptureError::InvalidDimensions { .. }
                | CaptureError::NotImplemented { .. }
        )
    }
}
