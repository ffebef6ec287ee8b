//! Error types for htmlstamp.

use std::path::PathBuf;

use thiserror::Error;

/// htmlstamp error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A git command exited non-zero. Holds the captured stderr.
    #[error("git error: {0}")]
    Git(String),

    #[error("Malformed HTML. {source_name} {reason}")]
    MalformedHtml { source_name: String, reason: String },

    #[error("Invalid date '{0}': expected DD/Mon/YYYY, e.g. 31/Dec/2021")]
    InvalidDate(String),

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),
}

impl Error {
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedHtml {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}
