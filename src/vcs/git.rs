//! `Vcs` backed by the `git` command line.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use super::{TrackedChange, Vcs};
use crate::error::Error;

/// Runs `git` in a repository working tree.
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the working tree containing `dir`.
    pub fn discover(dir: &Path) -> Result<Self, Error> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(dir)
            .output()?;

        if !output.status.success() {
            return Err(Error::NotARepository(dir.to_path_buf()));
        }

        let top = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self::new(top))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn git(&self, args: &[&str]) -> Result<Output, Error> {
        debug!(?args, root = %self.root.display(), "Running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git(stderr.into_owned()));
        }

        Ok(output)
    }
}

impl Vcs for GitCli {
    fn staged_changes(&self) -> Result<Vec<TrackedChange>, Error> {
        let output = self.git(&["diff", "--name-status", "--cached", "-z"])?;
        Ok(parse_name_status(&String::from_utf8_lossy(&output.stdout)))
    }

    fn stage(&self, path: &str) -> Result<(), Error> {
        self.git(&["add", "--", path])?;
        Ok(())
    }
}

/// Parse `git diff --name-status -z` output.
///
/// Records are NUL-separated: a status field, then one path, or two for
/// renames and copies. Renames and copies report the destination path.
pub fn parse_name_status(output: &str) -> Vec<TrackedChange> {
    let mut fields = output.split('\0');
    let mut changes = Vec::new();

    while let Some(status_field) = fields.next() {
        let Some(status) = status_field.chars().next() else {
            continue;
        };
        let path_count = if matches!(status, 'R' | 'C') { 2 } else { 1 };
        let Some(path) = fields.by_ref().take(path_count).last() else {
            break;
        };
        if path.is_empty() {
            continue;
        }
        changes.push(TrackedChange::new(path, status));
    }

    changes
}
