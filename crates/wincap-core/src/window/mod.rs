mod types;

pub use types::{WindowId, WindowInfo};
