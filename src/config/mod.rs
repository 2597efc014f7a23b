//! Configuration management for herdbook.
//!
//! This module handles loading configuration and resolving data paths under
//! `~/.herdbook/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, ListConfig, SeedConfig, StorageConfig};
