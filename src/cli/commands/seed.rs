//! Seed command implementation.
//!
//! Reseeding wipes the table, so it only runs after `confirm` agrees.

use colored::Colorize;
use rand::Rng;
use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::error::HerdbookError;
use crate::records::RecordFilter;
use crate::storage::RecordStore;

/// Execute the seed command.
///
/// `confirm` receives the number of records that would be lost and the
/// number that would be generated.
///
/// # Errors
///
/// Returns an error if counting or reseeding fails.
pub fn seed<F, R>(
    store: &RecordStore,
    count: usize,
    confirm: F,
    rng: &mut R,
    format: OutputFormat,
) -> Result<String, HerdbookError>
where
    F: FnOnce(u64, usize) -> bool,
    R: Rng + ?Sized,
{
    let existing = store.count(&RecordFilter::all())?;

    if !confirm(existing, count) {
        return match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "seeded": false,
                "existing": existing,
            }))?),
            OutputFormat::Pretty => Ok("Aborted; existing records kept".to_string()),
        };
    }

    let inserted = store.reseed(count, rng)?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "seeded": true,
            "removed": existing,
            "inserted": inserted,
        }))?),
        OutputFormat::Pretty => Ok(format!(
            "{} removed {existing} records, generated {inserted} sample records in {}",
            "Reseeded:".green().bold(),
            store.database().path().display()
        )),
    }
}
