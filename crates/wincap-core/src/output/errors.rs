use crate::errors::WincapError;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to encode image as {format}: {source}")]
    EncodeFailed {
        format: &'static str,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to create output directory '{path}': {source}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write image to '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl WincapError for OutputError {
    fn error_code(&self) -> &'static str {
        match self {
            OutputError::EncodeFailed { .. } => "OUTPUT_ENCODE_FAILED",
            OutputError::DirectoryCreationFailed { .. } => "OUTPUT_DIRECTORY_FAILED",
            OutputError::WriteFailed { .. } => "OUTPUT_WRITE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            OutputError::DirectoryCreationFailed { .. } | OutputError::WriteFailed { .. }
        )
    }
}
