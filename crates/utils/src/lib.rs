mod bytes;
pub mod media_types;
mod progress;
mod time;

pub use bytes::format_bytes;
pub use media_types::{DEFAULT_EXTENSION, ExtensionMatcher, normalize_extension};
pub use progress::Progress;
pub use time::format_duration;
