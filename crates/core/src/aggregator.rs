use reelmeter_models::Aggregation;
use std::path::Path;
use tracing::{debug, info};

use crate::DurationProbe;

/// Receives the completion ratio after each file.
pub trait ProgressSink {
    fn report(&self, fraction: f64);
}

impl<F: Fn(f64)> ProgressSink for F {
    fn report(&self, fraction: f64) {
        self(fraction);
    }
}

/// Sums probed durations over a list of files, one file at a time.
pub struct Aggregator<'a> {
    probe: &'a dyn DurationProbe,
}

impl<'a> Aggregator<'a> {
    #[must_use]
    pub fn new(probe: &'a dyn DurationProbe) -> Self {
        Self { probe }
    }

    /// Probes every path in order and reports `(index + 1) / total` after each.
    ///
    /// The last report is exactly `1.0`. An empty list reports nothing and
    /// never touches the probe.
    #[allow(clippy::cast_precision_loss)]
    pub fn aggregate<P: AsRef<Path>>(&self, paths: &[P], sink: &dyn ProgressSink) -> Aggregation {
        let total = paths.len();
        let mut aggregation = Aggregation {
            file_count: total,
            ..Aggregation::default()
        };

        if total == 0 {
            debug!("Aggregator: Nothing to probe");
            return aggregation;
        }

        for (idx, path) in paths.iter().enumerate() {
            let path = path.as_ref();
            match self.probe.read_stats(path) {
                Ok(stats) => aggregation.total_seconds += stats.duration_seconds(),
                Err(e) => {
                    debug!("Aggregator: {:?} counted as 0s: {}", path, e);
                    aggregation.unreadable_files += 1;
                }
            }

            sink.report((idx + 1) as f64 / total as f64);
        }

        info!(
            "Aggregator: {} files, {:.1}s total, {} unreadable",
            aggregation.file_count, aggregation.total_seconds, aggregation.unreadable_files
        );
        aggregation
    }
}
