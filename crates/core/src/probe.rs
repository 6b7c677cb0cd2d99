use mp4::{Mp4Reader, Mp4Track, TrackType};
use std::fs::File;
use std::io::BufReader;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, trace};

use crate::ProbeError;

/// Frame metadata declared by a container header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoStats {
    pub frame_count: u64,
    pub frame_rate: f64,
}

impl VideoStats {
    /// `frame_count / frame_rate`, or `0.0` when the frame rate is not a
    /// strictly positive finite number.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        if self.frame_rate.is_finite() && self.frame_rate > 0.0 {
            self.frame_count as f64 / self.frame_rate
        } else {
            0.0
        }
    }
}

/// Reads the declared duration of a video file without decoding it.
pub trait DurationProbe: Send + Sync {
    /// Reads frame count and frame rate from the file's header.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] if the file cannot be opened or parsed, or has
    /// no usable video track.
    fn read_stats(&self, path: &Path) -> Result<VideoStats, ProbeError>;

    /// Duration in seconds; any failure yields `0.0`.
    fn duration_seconds(&self, path: &Path) -> f64 {
        match self.read_stats(path) {
            Ok(stats) => stats.duration_seconds(),
            Err(e) => {
                debug!("Probe: {:?} counted as 0s: {}", path, e);
                0.0
            }
        }
    }
}

/// MP4/ISO-BMFF header reader backed by the `mp4` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mp4Probe;

impl Mp4Probe {
    /// Extensions of the ISO-BMFF containers this probe can read.
    pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "3gp", "3g2"];

    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` when files with `extension` are ISO-BMFF containers.
    /// Anything else is still collected but counts as unreadable.
    #[must_use]
    pub fn supports_extension(extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        Self::SUPPORTED_EXTENSIONS
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(extension))
    }
}

impl DurationProbe for Mp4Probe {
    fn read_stats(&self, path: &Path) -> Result<VideoStats, ProbeError> {
        let file = File::open(path).map_err(|source| ProbeError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let size = file
            .metadata()
            .map_err(|source| ProbeError::Open {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        // The reader owns the file handle; both are dropped when this returns.
        let reader = BufReader::new(file);
        let mp4 = panic::catch_unwind(AssertUnwindSafe(|| Mp4Reader::read_header(reader, size)))
            .map_err(|_| ProbeError::Malformed)??;

        let track = mp4
            .tracks()
            .values()
            .filter(|t| matches!(t.track_type(), Ok(TrackType::Video)))
            .max_by_key(|t| t.sample_count())
            .ok_or(ProbeError::NoVideoTrack)?;

        let stats = track_stats(track)?;
        trace!(
            "Probe: {:?} has {} frames at {:.3} fps",
            path, stats.frame_count, stats.frame_rate
        );
        Ok(stats)
    }
}

#[allow(clippy::cast_precision_loss)]
fn track_stats(track: &Mp4Track) -> Result<VideoStats, ProbeError> {
    let mdhd = &track.trak.mdia.mdhd;
    if mdhd.timescale == 0 {
        return Err(ProbeError::ZeroTimescale);
    }

    let frame_count = u64::from(track.sample_count());
    let seconds = mdhd.duration as f64 / f64::from(mdhd.timescale);
    let frame_rate = if seconds > 0.0 {
        frame_count as f64 / seconds
    } else {
        0.0
    };

    Ok(VideoStats {
        frame_count,
        frame_rate,
    })
}
