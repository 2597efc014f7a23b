//! Delete command implementation.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::error::HerdbookError;
use crate::output::format_record_pretty;
use crate::records::Record;
use crate::storage::RecordStore;

/// Execute the delete command.
///
/// The record must exist; `confirm` is shown the record and decides whether
/// the delete goes ahead.
///
/// # Errors
///
/// Returns `HerdbookError::NotFound` if the record does not exist, or an
/// error if the delete fails.
pub fn delete<F>(
    store: &RecordStore,
    id: i64,
    confirm: F,
    format: OutputFormat,
) -> Result<String, HerdbookError>
where
    F: FnOnce(&Record) -> bool,
{
    let record = store.get(id)?;

    if !confirm(&record) {
        return match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "deleted": false,
                "id": id,
            }))?),
            OutputFormat::Pretty => Ok("Aborted; nothing deleted".to_string()),
        };
    }

    if !store.delete(id)? {
        return Err(HerdbookError::NotFound(id));
    }

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "deleted": true,
            "record": record,
        }))?),
        OutputFormat::Pretty => Ok(format!(
            "{} {}",
            "Deleted:".red().bold(),
            format_record_pretty(&record)
        )),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::records::{NewRecord, RecordFilter};
    use crate::storage::Database;

    fn store_with_one() -> (TempDir, RecordStore) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::init_at(&temp_dir.path().join("herdbook.db")).unwrap();
        let store = RecordStore::new(db);
        store.add(&NewRecord::new("Huyện Ba Bể", "Xã Nam Mẫu", 2024)).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_delete_confirmed() {
        let (_dir, store) = store_with_one();

        let output = delete(&store, 1, |r| r.id == 1, OutputFormat::Json).unwrap();
        assert!(output.contains("\"deleted\": true"));
        assert_eq!(store.count(&RecordFilter::all()).unwrap(), 0);
    }

    #[test]
    fn test_delete_declined() {
        let (_dir, store) = store_with_one();

        let output = delete(&store, 1, |_| false, OutputFormat::Pretty).unwrap();
        assert!(output.contains("Aborted"));
        assert_eq!(store.count(&RecordFilter::all()).unwrap(), 1);
    }

    #[test]
    fn test_delete_missing_never_prompts() {
        let (_dir, store) = store_with_one();

        let err = delete(
            &store,
            9999,
            |_| panic!("should not ask for a missing record"),
            OutputFormat::Pretty,
        )
        .unwrap_err();
        assert!(matches!(err, HerdbookError::NotFound(9999)));
        assert_eq!(store.count(&RecordFilter::all()).unwrap(), 1);
    }
}
