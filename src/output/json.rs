//! JSON output formatting for herdbook.

use serde::Serialize;
use serde_json::json;

use crate::error::HerdbookError;
use crate::records::lookup::DistrictEntry;
use crate::records::{Page, Record, RecordFilter, Totals};

/// Format records as JSON
///
/// # Errors
///
/// Returns `HerdbookError::Parse` if JSON serialization fails.
pub fn format_records_json(
    records: &[Record],
    filter: &RecordFilter,
    total: u64,
    page: Option<Page>,
) -> Result<String, HerdbookError> {
    let output = json!({
        "filter": filter,
        "total": total,
        "page": page.map(|p| p.number),
        "page_size": page.map(|p| p.size),
        "count": records.len(),
        "items": records
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format aggregate figures as JSON
///
/// # Errors
///
/// Returns `HerdbookError::Parse` if JSON serialization fails.
pub fn format_totals_json(totals: &Totals, filter: &RecordFilter) -> Result<String, HerdbookError> {
    let output = json!({
        "filter": filter,
        "totals": totals,
        "total_headcount": totals.total_headcount()
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the district lookup as JSON
///
/// # Errors
///
/// Returns `HerdbookError::Parse` if JSON serialization fails.
pub fn format_districts_json(entries: &[DistrictEntry]) -> Result<String, HerdbookError> {
    let items: Vec<_> = entries
        .iter()
        .map(|(district, communes)| json!({ "district": district, "communes": communes }))
        .collect();
    Ok(serde_json::to_string_pretty(&json!({
        "count": items.len(),
        "items": items
    }))?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `HerdbookError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, HerdbookError> {
    Ok(serde_json::to_string_pretty(value)?)
}
