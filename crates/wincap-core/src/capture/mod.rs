pub mod errors;
pub mod pixel;
pub mod search;
pub mod serialized;
pub mod traits;
pub mod types;

pub use errors::CaptureError;
pub use pixel::{PixelLayout, dib_buffer_len, normalize};
pub use search::{capture_by_title, find_window_by_id, sanitize_title, title_matches};
pub use serialized::SerializedCapture;
pub use traits::WindowCapture;
pub use types::{CaptureOptions, crop_exceeds_window};
