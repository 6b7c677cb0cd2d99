use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::AggregateResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Idle,
    Calculating,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Inputs of one run, captured when the run starts and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub root: PathBuf,
    pub extension: String,
    pub follow_links: bool,
    pub skip_hidden: bool,
}

impl RunRequest {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            follow_links: false,
            skip_hidden: false,
        }
    }
}

/// Messages a worker posts to the foreground. The worker never mutates
/// display state itself.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Status(String),
    Progress(f64),
    NoFiles(String),
    Finished(AggregateResult),
    Failed(String),
}
