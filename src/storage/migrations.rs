//! Database migrations for herdbook.
//!
//! The schema version lives in `PRAGMA user_version`. Migrations run during
//! [`Database::init_at`](super::Database::init_at), once per process.

use rusqlite::Connection;

use crate::error::HerdbookError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 for a new database.
pub fn get_version(conn: &Connection) -> Result<i32, HerdbookError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| HerdbookError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), HerdbookError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| HerdbookError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), HerdbookError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        log::debug!("Applying schema migration v{version}");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), HerdbookError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(HerdbookError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: the livestock record table.
///
/// `AUTOINCREMENT` keeps ids monotonic across deletes and gives reseeding a
/// `sqlite_sequence` row to reset.
fn migrate_v1(conn: &Connection) -> Result<(), HerdbookError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS livestock_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            district TEXT NOT NULL,
            commune TEXT NOT NULL,
            year INTEGER NOT NULL,
            buffalo_count INTEGER NOT NULL DEFAULT 0,
            cattle_count INTEGER NOT NULL DEFAULT 0,
            pig_count INTEGER NOT NULL DEFAULT 0,
            goat_count INTEGER NOT NULL DEFAULT 0,
            slaughter_total INTEGER NOT NULL DEFAULT 0,
            meat_output_tons REAL NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_livestock_records_location
        ON livestock_records(district, commune);
        ",
    )
    .map_err(|e| HerdbookError::Database(format!("Migration v1 failed: {e}")))
}
