//! Command-line interface for herdbook.

pub mod args;
pub mod commands;
pub mod prompt;
