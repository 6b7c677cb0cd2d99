mod aggregator;
mod calculator;
mod error;
mod probe;
mod report;
mod scanner;

pub use aggregator::{Aggregator, ProgressSink};
pub use calculator::{Calculator, EventSink, run_pipeline};
pub use error::{CoreError, ProbeError};
pub use probe::{DurationProbe, Mp4Probe, VideoStats};
pub use report::{format_summary, no_files_message};
pub use scanner::{ScanOptions, Scanner};
