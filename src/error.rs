//! Error types shared by the git layer, the analyzers and the reporters.
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PulseError>;

#[derive(Debug, Error)]
pub enum PulseError {
    /// git ran but exited non-zero. `stderr` is what git printed, trailing
    /// newline removed.
    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailure {
        command: String,
        status: String,
        stderr: String,
    },

    /// The git executable could not be started at all.
    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("`{command}` did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// Log or date text that does not have the expected shape.
    #[error("cannot parse {context}: {detail}")]
    ParseFailure { context: String, detail: String },

    /// The accessibility probe failed: missing path, not a repository,
    /// or a repository without commits.
    #[error("cannot access repository at {}: {reason}", path.display())]
    RepositoryAccess { path: PathBuf, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl PulseError {
    pub(crate) fn parse(context: impl Into<String>, detail: impl Into<String>) -> Self {
        PulseError::ParseFailure {
            context: context.into(),
            detail: detail.into(),
        }
    }
}
