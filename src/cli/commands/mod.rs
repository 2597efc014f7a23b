//! Command implementations for herdbook.
//!
//! Every command takes the store (where it needs one), its arguments and the
//! output format, and returns the text to print.

mod add;
mod delete;
mod seed;

pub use add::{add, update};
pub use delete::delete;
pub use seed::seed;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, FilterArgs, ListArgs, OutputFormat};
use crate::config::ListConfig;
use crate::error::HerdbookError;
use crate::output::{format_districts, format_record, format_records, format_totals};
use crate::records::{lookup, Page};
use crate::storage::RecordStore;

/// Execute list command
///
/// Without `--page` or `--page-size` every match is returned.
///
/// # Errors
///
/// Returns an error if the query or output formatting fails.
pub fn list(
    store: &RecordStore,
    args: &ListArgs,
    defaults: &ListConfig,
    format: OutputFormat,
) -> Result<String, HerdbookError> {
    let filter = args.filter.to_filter();
    let order = args.order(defaults.order);
    let page = match (args.page, args.page_size) {
        (None, None) => None,
        (number, size) => Some(Page::new(
            number.unwrap_or(1),
            size.unwrap_or(defaults.page_size),
        )),
    };

    let records = store.list(&filter, order, page)?;
    let total = store.count(&filter)?;
    format_records(&records, &filter, total, page, format)
}

/// Execute show command
///
/// # Errors
///
/// Returns `HerdbookError::NotFound` if the record does not exist.
pub fn show(store: &RecordStore, id: i64, format: OutputFormat) -> Result<String, HerdbookError> {
    let record = store.get(id)?;
    format_record(&record, format)
}

/// Execute stats command
///
/// # Errors
///
/// Returns an error if the query or output formatting fails.
pub fn stats(
    store: &RecordStore,
    args: &FilterArgs,
    format: OutputFormat,
) -> Result<String, HerdbookError> {
    let filter = args.to_filter();
    let totals = store.totals(&filter)?;
    format_totals(&totals, &filter, format)
}

/// Execute districts command
///
/// # Errors
///
/// Returns `HerdbookError::Validation` for an unknown district.
pub fn districts(district: Option<&str>, format: OutputFormat) -> Result<String, HerdbookError> {
    let entries = match district {
        Some(name) => {
            let entry = lookup::DISTRICTS
                .iter()
                .find(|(district, _)| *district == name)
                .ok_or_else(|| {
                    HerdbookError::Validation(format!(
                        "unknown district '{name}'; known districts: {}",
                        lookup::districts().collect::<Vec<_>>().join(", ")
                    ))
                })?;
            std::slice::from_ref(entry)
        }
        None => lookup::DISTRICTS,
    };
    format_districts(entries, format)
}

/// Generate shell completions for the specified shell.
#[must_use]
pub fn completions(shell: Shell) -> String {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "herdbook", &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::records::{NewRecord, SortOrder};
    use crate::storage::Database;

    fn store() -> (TempDir, RecordStore) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::init_at(&temp_dir.path().join("herdbook.db")).unwrap();
        let store = RecordStore::new(db);
        for commune in ["Xã Nam Mẫu", "Xã Khang Ninh", "Xã Nam Mẫu"] {
            store.add(&NewRecord::new("Huyện Ba Bể", commune, 2024)).unwrap();
        }
        store.add(&NewRecord::new("Huyện Na Rì", "Xã Kim Hỷ", 2022)).unwrap();
        (temp_dir, store)
    }

    fn list_args(filter: FilterArgs) -> ListArgs {
        ListArgs {
            filter,
            page: None,
            page_size: None,
            oldest_first: false,
            newest_first: false,
        }
    }

    #[test]
    fn test_list_json_newest_first() {
        let (_dir, store) = store();
        let output = list(
            &store,
            &list_args(FilterArgs::default()),
            &ListConfig::default(),
            OutputFormat::Json,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total"], 4);
        assert_eq!(value["items"][0]["id"], 4);
        assert!(value["page"].is_null());
    }

    #[test]
    fn test_list_paged_uses_config_defaults() {
        let (_dir, store) = store();
        let mut args = list_args(FilterArgs::default());
        args.page = Some(2);
        let defaults = ListConfig {
            page_size: 3,
            order: SortOrder::OldestFirst,
        };

        let output = list(&store, &args, &defaults, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["total"], 4);
        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["id"], 4);
        assert_eq!(value["page_size"], 3);
    }

    #[test]
    fn test_list_filtered_count() {
        let (_dir, store) = store();
        let args = list_args(FilterArgs {
            district: Some("Huyện Ba Bể".to_string()),
            commune: None,
            search: Some("NAM".to_string()),
        });

        let output = list(&store, &args, &ListConfig::default(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total"], 2);
    }

    #[test]
    fn test_show_missing() {
        let (_dir, store) = store();
        assert!(matches!(
            show(&store, 99, OutputFormat::Pretty),
            Err(HerdbookError::NotFound(99))
        ));
    }

    #[test]
    fn test_stats() {
        let (_dir, store) = store();
        let args = FilterArgs {
            district: Some("Huyện Na Rì".to_string()),
            ..FilterArgs::default()
        };
        let output = stats(&store, &args, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["totals"]["records"], 1);
    }

    #[test]
    fn test_districts() {
        let output = districts(Some("Huyện Pác Nặm"), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 1);

        let output = districts(None, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 8);

        assert!(matches!(
            districts(Some("Huyện Không Có"), OutputFormat::Json),
            Err(HerdbookError::Validation(_))
        ));
    }

    #[test]
    fn test_completions() {
        let script = completions(Shell::Bash);
        assert!(script.contains("herdbook"));
    }
}
