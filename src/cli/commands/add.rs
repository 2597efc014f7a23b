//! Add and update command implementations.
//!
//! Both commands build a complete [`NewRecord`], validate it, and hand it to
//! the store. `update` starts from the stored record so omitted flags keep
//! their current values.

use chrono::Datelike;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{AddArgs, OutputFormat, UpdateArgs};
use crate::error::HerdbookError;
use crate::output::format_record_pretty;
use crate::records::{lookup, NewRecord, Record};
use crate::storage::RecordStore;

/// Execute the add command.
///
/// # Errors
///
/// Returns a validation error for rejected input, or an error if the insert
/// fails.
pub fn add(
    store: &RecordStore,
    args: AddArgs,
    format: OutputFormat,
) -> Result<String, HerdbookError> {
    let mut record = NewRecord::new(args.district.trim(), args.commune.trim(), current_year());
    args.figures.apply(&mut record);

    record.validate()?;
    warn_unknown_pair(&record);

    let created = store.add(&record)?;
    format_change("Added", &created, format)
}

/// Execute the update command.
///
/// # Errors
///
/// Returns `HerdbookError::NotFound` if the record does not exist, a
/// validation error for rejected input, or an error if the write fails.
pub fn update(
    store: &RecordStore,
    args: UpdateArgs,
    format: OutputFormat,
) -> Result<String, HerdbookError> {
    if !args.has_changes() {
        return Err(HerdbookError::Validation(
            "nothing to update; pass at least one field flag".to_string(),
        ));
    }

    let existing = store.get(args.id)?;
    let mut record = existing.fields;
    if let Some(district) = &args.district {
        record.district = district.trim().to_string();
    }
    if let Some(commune) = &args.commune {
        record.commune = commune.trim().to_string();
    }
    args.figures.apply(&mut record);

    record.validate()?;
    warn_unknown_pair(&record);

    let updated = store.update(args.id, &record)?;
    format_change("Updated", &updated, format)
}

fn warn_unknown_pair(record: &NewRecord) {
    if !lookup::is_known_pair(&record.district, &record.commune) {
        log::warn!(
            "'{}' is not a listed commune of '{}'; storing as given",
            record.commune,
            record.district
        );
    }
}

fn format_change(verb: &str, record: &Record, format: OutputFormat) -> Result<String, HerdbookError> {
    match format {
        OutputFormat::Json => {
            let output = json!({
                "action": verb.to_lowercase(),
                "record": record,
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Pretty => Ok(format!(
            "{} {}",
            format!("{verb}:").green().bold(),
            format_record_pretty(record)
        )),
    }
}

fn current_year() -> i64 {
    i64::from(chrono::Local::now().year())
}
