//! Configuration settings for herdbook.
//!
//! Settings are loaded from `~/.herdbook/config.yaml`. Every section and
//! field is optional; missing values fall back to defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::HerdbookError;
use crate::records::SortOrder;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Database location.
    pub storage: StorageConfig,
    /// List view settings.
    pub list: ListConfig,
    /// Sample data settings.
    pub seed: SeedConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply the setting to the `colored` crate's global override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Database location settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file; defaults to `~/.herdbook/herdbook.db`.
    pub database: Option<PathBuf>,
}

/// List view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Rows per page when paging is requested.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Default ordering by id.
    #[serde(default)]
    pub order: SortOrder,
}

/// Sample data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Number of records `seed` generates when no count is given.
    #[serde(default = "default_seed_count")]
    pub default_count: usize,
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_page_size() -> u32 {
    10
}

const fn default_seed_count() -> usize {
    50
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            order: SortOrder::default(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            default_count: default_seed_count(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, HerdbookError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            HerdbookError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            HerdbookError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), HerdbookError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| HerdbookError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            HerdbookError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Resolve the database file: explicit override, then config, then the
    /// default location under `paths`.
    #[must_use]
    pub fn database_path(&self, explicit: Option<PathBuf>, paths: &Paths) -> PathBuf {
        explicit
            .or_else(|| self.storage.database.clone())
            .unwrap_or_else(|| paths.database.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.list.page_size, 10);
        assert_eq!(config.list.order, SortOrder::NewestFirst);
        assert_eq!(config.seed.default_count, 50);
        assert!(config.storage.database.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.list.page_size = 25;
        config.list.order = SortOrder::OldestFirst;
        config.seed.default_count = 10;

        config.save_to_path(&config_path).unwrap();
        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.list.page_size, 25);
        assert_eq!(loaded.list.order, SortOrder::OldestFirst);
        assert_eq!(loaded.seed.default_count, 10);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
list:
  order: oldest_first
storage:
  database: /var/lib/herdbook/chan_nuoi.db
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.list.order, SortOrder::OldestFirst);
        assert_eq!(config.list.page_size, 10);
        assert_eq!(
            config.storage.database,
            Some(PathBuf::from("/var/lib/herdbook/chan_nuoi.db"))
        );
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "list: [not, a, map]").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, HerdbookError::Config(_)));
    }

    #[test]
    fn test_database_path_precedence() {
        let paths = Paths::with_root(PathBuf::from("/home/u/.herdbook"));
        let mut config = Config::default();

        assert_eq!(
            config.database_path(None, &paths),
            PathBuf::from("/home/u/.herdbook/herdbook.db")
        );

        config.storage.database = Some(PathBuf::from("/data/a.db"));
        assert_eq!(config.database_path(None, &paths), PathBuf::from("/data/a.db"));
        assert_eq!(
            config.database_path(Some(PathBuf::from("b.db")), &paths),
            PathBuf::from("b.db")
        );
    }
}
