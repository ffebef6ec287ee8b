//! Version control access and staged-change selection.

pub mod git;

pub use git::{parse_name_status, GitCli};

use crate::error::Error;

/// Status letter reported by `git diff --name-status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    TypeChanged,
    Other(char),
}

impl From<char> for ChangeStatus {
    fn from(c: char) -> Self {
        match c {
            'A' => ChangeStatus::Added,
            'M' => ChangeStatus::Modified,
            'D' => ChangeStatus::Deleted,
            'R' => ChangeStatus::Renamed,
            'C' => ChangeStatus::Copied,
            'T' => ChangeStatus::TypeChanged,
            other => ChangeStatus::Other(other),
        }
    }
}

/// A staged path and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedChange {
    pub path: String,
    pub status: ChangeStatus,
}

impl TrackedChange {
    pub fn new(path: impl Into<String>, status: impl Into<ChangeStatus>) -> Self {
        Self {
            path: path.into(),
            status: status.into(),
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.status == ChangeStatus::Deleted
    }

    /// Text after the last `.` of the file name, if any.
    pub fn extension(&self) -> Option<&str> {
        let name = self.path.rsplit('/').next().unwrap_or(&self.path);
        match name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Some(ext),
            _ => None,
        }
    }
}

/// The two version control operations a stamping run needs.
pub trait Vcs {
    /// Changes staged since the last commit, in git's listing order.
    fn staged_changes(&self) -> Result<Vec<TrackedChange>, Error>;

    /// Add `path` to the index so it lands in the pending commit.
    fn stage(&self, path: &str) -> Result<(), Error>;
}

/// Keep changes that still exist and whose extension is in `extensions`.
pub fn filter_changes<S: AsRef<str>>(changes: &[TrackedChange], extensions: &[S]) -> Vec<String> {
    changes
        .iter()
        .filter(|c| !c.is_deleted())
        .filter(|c| {
            c.extension()
                .is_some_and(|ext| extensions.iter().any(|e| e.as_ref() == ext))
        })
        .map(|c| c.path.clone())
        .collect()
}

/// Staged, non-deleted paths matching `extensions`, relative to the repo root.
pub fn find_modified_files<S: AsRef<str>>(
    vcs: &dyn Vcs,
    extensions: &[S],
) -> Result<Vec<String>, Error> {
    let changes = vcs.staged_changes()?;
    let modified = filter_changes(&changes, extensions);
    tracing::debug!(
        staged = changes.len(),
        matched = modified.len(),
        "Selected staged files"
    );
    Ok(modified)
}
