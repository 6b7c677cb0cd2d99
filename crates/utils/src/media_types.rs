use color_eyre::eyre::{Result, bail};
use regex::Regex;
use std::path::Path;

pub const DEFAULT_EXTENSION: &str = "mp4";

/// Lowercases an extension and strips surrounding whitespace and leading dots.
#[must_use]
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

/// Case-insensitive filename suffix match for a single extension.
#[derive(Debug, Clone)]
pub struct ExtensionMatcher {
    extension: String,
    pattern: Regex,
}

impl ExtensionMatcher {
    /// Builds a matcher for `extension` (with or without a leading dot).
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is empty or contains a path separator.
    pub fn new(extension: &str) -> Result<Self> {
        let extension = normalize_extension(extension);
        if extension.is_empty() {
            bail!("File extension must not be empty");
        }
        if extension.contains(['/', '\\']) {
            bail!("File extension must not contain a path separator: {extension}");
        }

        let pattern = Regex::new(&format!(r"(?i)\.{}$", regex::escape(&extension)))?;
        Ok(Self { extension, pattern })
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// True when the file name of `path` ends with `.<extension>`, ignoring case.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.pattern.is_match(&name.to_string_lossy()))
    }
}

impl Default for ExtensionMatcher {
    fn default() -> Self {
        #[allow(clippy::expect_used)]
        Self::new(DEFAULT_EXTENSION).expect("default extension is valid")
    }
}
