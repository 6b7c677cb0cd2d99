mod media_file;
mod state;
mod statistics;

pub use media_file::{FileEntry, ScanOutcome};
pub use state::{AppState, InputMode, MessageLevel, RunEvent, RunRequest};
pub use statistics::{AggregateResult, Aggregation};
