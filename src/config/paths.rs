//! Path resolution for herdbook configuration and data files.
//!
//! All herdbook data is stored in `~/.herdbook/`:
//! - `config.yaml` - Optional configuration file
//! - `herdbook.db` - SQLite database with the livestock records

use std::path::PathBuf;

use crate::error::HerdbookError;

/// Paths to herdbook configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.herdbook/`
    pub root: PathBuf,
    /// Config file: `~/.herdbook/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.herdbook/herdbook.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, HerdbookError> {
        let home = std::env::var("HOME").map_err(|_| {
            HerdbookError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".herdbook")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("herdbook.db"),
            root,
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".herdbook")))
    }
}
