use rayon::iter::{ParallelBridge, ParallelIterator};
use reelmeter_models::{FileEntry, RunRequest, ScanOutcome};
use reelmeter_utils::ExtensionMatcher;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub follow_links: bool,
    pub skip_hidden: bool,
}

/// Recursive folder walker that collects files with one extension.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    matcher: ExtensionMatcher,
    options: ScanOptions,
}

impl Scanner {
    #[must_use]
    pub fn new(matcher: ExtensionMatcher, options: ScanOptions) -> Self {
        Self { matcher, options }
    }

    /// Builds a scanner from the captured inputs of a run.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidExtension`] if the requested extension is
    /// empty or not a plain suffix.
    pub fn from_request(request: &RunRequest) -> Result<Self, CoreError> {
        let matcher =
            ExtensionMatcher::new(&request.extension).map_err(|e| CoreError::InvalidExtension(e.to_string()))?;
        Ok(Self::new(
            matcher,
            ScanOptions {
                follow_links: request.follow_links,
                skip_hidden: request.skip_hidden,
            },
        ))
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        self.matcher.extension()
    }

    /// Walks `root` and returns every matching file with the sum of their sizes.
    ///
    /// A missing or non-directory root yields an empty outcome. Entries that
    /// cannot be read are skipped, and a matched file whose size cannot be
    /// read is kept with size 0.
    #[must_use]
    pub fn scan(&self, root: &Path) -> ScanOutcome {
        info!("Scanner: Starting scan of {:?} for .{} files", root, self.extension());

        if !root.is_dir() {
            warn!("Scanner: {:?} is not a readable directory", root);
            return ScanOutcome::default();
        }

        let skip_hidden = self.options.skip_hidden;
        let files: Vec<FileEntry> = WalkDir::new(root)
            .follow_links(self.options.follow_links)
            .into_iter()
            .filter_entry(|e| !(skip_hidden && e.depth() > 0 && is_hidden(e)))
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(err) => {
                    debug!("Scanner: Skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(is_regular_file)
            .filter(|e| self.matcher.matches(e.path()))
            .par_bridge()
            .map(|e| {
                let size = match std::fs::metadata(e.path()) {
                    Ok(metadata) => metadata.len(),
                    Err(err) => {
                        debug!("Scanner: Could not read size of {:?}: {}", e.path(), err);
                        0
                    }
                };
                FileEntry::new(e.into_path(), size)
            })
            .collect();

        let outcome = ScanOutcome::new(files);
        info!(
            "Scanner: Found {} files ({} bytes) in {:?}",
            outcome.len(),
            outcome.total_bytes,
            root
        );
        outcome
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

// A symlink counts as a file unless it resolves to a directory, so a dangling
// link is kept and later sized as 0. With `follow_links` walkdir reports a
// dangling link as an error instead, and it is skipped.
fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && !entry.path().is_dir())
}
