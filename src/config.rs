//! Configuration for htmlstamp.
//!
//! Looked up in `<repo>/.htmlstamp.toml`, then `~/.htmlstamp/config.toml`.
//! Missing files mean defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Project config file name, relative to the repository root.
pub const PROJECT_CONFIG_FILE: &str = ".htmlstamp.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Extensions (without the dot) of files to stamp.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Keep a `.bkup` copy of every file before rewriting it.
    #[serde(default)]
    pub backup: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            backup: false,
            log_level: default_log_level(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["html".to_string(), "htm".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load the config that applies to `project_root`.
    pub fn load(project_root: &Path) -> Result<Self, Error> {
        let project = Self::project_path(project_root);
        if project.exists() {
            return Self::load_from(&project);
        }
        match Self::global_path() {
            Some(global) if global.exists() => Self::load_from(&global),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::ConfigParse(format!("{}: {}", path.display(), e)))
    }

    pub fn project_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_CONFIG_FILE)
    }

    /// `~/.htmlstamp/config.toml`, if a home directory exists.
    pub fn global_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".htmlstamp").join("config.toml"))
    }
}
