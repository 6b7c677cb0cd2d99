use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::sync::mpsc::unbounded_channel;

use reelmeter_core::{
    Aggregator, DurationProbe, Mp4Probe, ProbeError, VideoStats, format_summary, run_pipeline,
};
use reelmeter_models::{RunEvent, RunRequest};
use reelmeter_utils::format_bytes;

/// Looks durations up by file name; unknown names are unreadable.
struct TableProbe {
    durations: HashMap<PathBuf, f64>,
}

impl TableProbe {
    fn new(entries: &[(&str, f64)]) -> Self {
        Self {
            durations: entries.iter().map(|(p, d)| (PathBuf::from(p), *d)).collect(),
        }
    }
}

impl DurationProbe for TableProbe {
    fn read_stats(&self, path: &Path) -> Result<VideoStats, ProbeError> {
        self.durations
            .get(path)
            .map(|seconds| VideoStats {
                frame_count: (seconds * 1000.0).round() as u64,
                frame_rate: 1000.0,
            })
            .ok_or(ProbeError::NoVideoTrack)
    }
}

#[test]
fn test_pipeline_counts_fake_videos_as_unreadable() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("fake.mp4"), b"MP4_DATA not a real container").unwrap();
    std::fs::write(temp_dir.path().join("empty.mp4"), b"").unwrap();

    let (tx, mut rx) = unbounded_channel::<RunEvent>();
    let request = RunRequest::new(temp_dir.path(), "mp4");
    let result = run_pipeline(&request, &Mp4Probe::new(), &tx).unwrap().unwrap();

    assert_eq!(result.file_count, 2);
    assert_eq!(result.unreadable_files, 2);
    assert_eq!(result.total_seconds, 0.0);
    assert!(format_summary(&result).contains("Unreadable: 2"));

    let mut last_progress = None;
    while let Ok(event) = rx.try_recv() {
        if let RunEvent::Progress(f) = event {
            last_progress = Some(f);
        }
    }
    assert_eq!(last_progress, Some(1.0));
}

proptest! {
    #[test]
    fn prop_aggregate_total_is_sum_and_progress_monotonic(
        durations in prop::collection::vec(0.0f64..10_000.0, 1..40)
    ) {
        let names: Vec<String> = (0..durations.len()).map(|i| format!("clip{i}.mp4")).collect();
        let entries: Vec<(&str, f64)> = names.iter().map(String::as_str).zip(durations.iter().copied()).collect();
        let probe = TableProbe::new(&entries);
        let reports = RefCell::new(Vec::new());
        let sink = |f: f64| reports.borrow_mut().push(f);

        let aggregation = Aggregator::new(&probe).aggregate(&names, &sink);

        let expected: f64 = durations.iter().map(|d| (d * 1000.0).round() / 1000.0).sum();
        prop_assert!((aggregation.total_seconds - expected).abs() < 1e-6 * (1.0 + expected));

        let reports = reports.into_inner();
        prop_assert_eq!(reports.len(), durations.len());
        prop_assert!(reports.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(reports.last().copied(), Some(1.0));
    }

    #[test]
    fn prop_format_bytes_has_known_unit(bytes in any::<u64>()) {
        let formatted = format_bytes(bytes);
        let unit = formatted.rsplit(' ').next().unwrap_or_default();
        prop_assert!(["B", "KB", "MB", "GB", "TB", "PB"].contains(&unit));
    }
}
