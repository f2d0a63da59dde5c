pub mod errors;
pub mod handler;
pub mod types;

pub use errors::OutputError;
pub use handler::{default_file_name, encode, save_to_file, to_base64};
pub use types::ImageFormat;
