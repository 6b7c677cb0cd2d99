use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A matched file discovered during a scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

impl FileEntry {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.to_string_lossy().to_string(), |n| n.to_string_lossy().to_string())
    }
}

/// Everything a scan produced: the matched files and their summed size.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanOutcome {
    pub files: Vec<FileEntry>,
    pub total_bytes: u64,
}

impl ScanOutcome {
    #[must_use]
    pub fn new(files: Vec<FileEntry>) -> Self {
        let total_bytes = files.iter().map(|f| f.size).sum();
        Self { files, total_bytes }
    }

    #[must_use]
    pub fn paths(&self) -> Vec<&Path> {
        self.files.iter().map(|f| f.path.as_path()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
