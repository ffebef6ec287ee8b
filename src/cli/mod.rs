//! CLI commands for htmlstamp.

pub mod check;
pub mod hooks;
pub mod run;
pub mod stamp;
pub mod status;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Error;
use crate::vcs::{find_modified_files, GitCli};

/// What every command needs: the repository and its config.
pub struct Context {
    pub git: GitCli,
    pub config: Config,
}

impl Context {
    /// Build a context for the repository containing the current directory.
    pub fn from_current_dir() -> Result<Self, Error> {
        let cwd = std::env::current_dir()?;
        let git = GitCli::discover(&cwd)?;
        let config = Config::load(git.root())?;
        Ok(Self { git, config })
    }

    pub fn root(&self) -> &Path {
        self.git.root()
    }

    /// Staged files this run should look at.
    pub fn candidates(&self) -> Result<Vec<String>, Error> {
        find_modified_files(&self.git, self.config.extensions.as_slice())
    }
}

/// Repository root for commands that work without git on PATH.
pub fn current_root() -> Result<PathBuf, Error> {
    let cwd = std::env::current_dir()?;
    match GitCli::discover(&cwd) {
        Ok(git) => Ok(git.root().to_path_buf()),
        Err(_) if cwd.join(".git").is_dir() => Ok(cwd),
        Err(e) => Err(e),
    }
}
