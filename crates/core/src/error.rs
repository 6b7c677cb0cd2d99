use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("A calculation is already running")]
    AlreadyRunning,

    #[error("Invalid file extension: {0}")]
    InvalidExtension(String),

    #[error("Failed to start worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Why a file could not be probed. Callers of
/// [`DurationProbe::duration_seconds`](crate::DurationProbe::duration_seconds)
/// never see these; the file contributes zero seconds instead.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a readable MP4 container: {0}")]
    Container(#[from] mp4::Error),

    #[error("Container reader panicked while parsing the header")]
    Malformed,

    #[error("No video track")]
    NoVideoTrack,

    #[error("Video track has a zero timescale")]
    ZeroTimescale,
}
