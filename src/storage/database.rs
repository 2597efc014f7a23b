//! `SQLite` database file handling.
//!
//! [`Database`] remembers where the file lives. Schema setup happens once in
//! [`Database::init_at`]; every later operation asks for a fresh connection
//! with [`Database::connect`] and drops it when done.

use std::path::{Path, PathBuf};

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use crate::error::HerdbookError;
use crate::records::filter::{fold, FOLD_FUNCTION};

use super::migrations;

/// Handle to the herdbook database file.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Initialize the database at a specific path.
    ///
    /// Creates missing parent directories and the file, then runs pending
    /// migrations. Safe to call on an existing database.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or opened, or if a
    /// migration fails.
    pub fn init_at(path: &Path) -> Result<Self, HerdbookError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    HerdbookError::Database(format!(
                        "Failed to create directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let conn = open_connection(path)?;
        migrations::run(&conn)?;
        log::debug!("Database ready at {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Open a short-lived connection for a single operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn connect(&self) -> Result<Connection, HerdbookError> {
        open_connection(&self.path)
    }

    /// Location of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, HerdbookError> {
        migrations::get_version(&self.connect()?)
    }
}

fn open_connection(path: &Path) -> Result<Connection, HerdbookError> {
    let conn = Connection::open(path).map_err(|e| {
        HerdbookError::Database(format!("Failed to open database {}: {e}", path.display()))
    })?;

    conn.create_scalar_function(
        FOLD_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| fold(&t)))
        },
    )
    .map_err(|e| HerdbookError::Database(format!("Failed to register {FOLD_FUNCTION}: {e}")))?;

    Ok(conn)
}
