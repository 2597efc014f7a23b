//! herdbook - a record-keeper for livestock statistics
//!
//! This crate stores per-commune livestock headcounts, slaughter totals and
//! meat output in a local SQLite database, and provides a CLI and a TUI for
//! searching and editing them.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod records;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::HerdbookError;
pub use storage::{Database, RecordStore};
