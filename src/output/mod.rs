//! Output formatting for herdbook.
//!
//! This module provides formatters for displaying records in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::HerdbookError;
use crate::records::lookup::DistrictEntry;
use crate::records::{Page, Record, RecordFilter, Totals};

pub use json::*;
pub use pretty::*;

/// Format a page of records based on output format
///
/// # Errors
///
/// Returns `HerdbookError::Parse` if JSON serialization fails.
pub fn format_records(
    records: &[Record],
    filter: &RecordFilter,
    total: u64,
    page: Option<Page>,
    format: OutputFormat,
) -> Result<String, HerdbookError> {
    match format {
        OutputFormat::Pretty => {
            let title = match page {
                Some(page) => format!(
                    "Records: {filter}, page {}/{}",
                    page.number,
                    page.page_count(total).max(1)
                ),
                None => format!("Records: {filter}"),
            };
            Ok(format_records_pretty(records, &title, total))
        }
        OutputFormat::Json => format_records_json(records, filter, total, page),
    }
}

/// Format a single record based on output format
///
/// # Errors
///
/// Returns `HerdbookError::Parse` if JSON serialization fails.
pub fn format_record(record: &Record, format: OutputFormat) -> Result<String, HerdbookError> {
    match format {
        OutputFormat::Pretty => Ok(format_record_pretty(record)),
        OutputFormat::Json => to_json(record),
    }
}

/// Format totals based on output format
///
/// # Errors
///
/// Returns `HerdbookError::Parse` if JSON serialization fails.
pub fn format_totals(
    totals: &Totals,
    filter: &RecordFilter,
    format: OutputFormat,
) -> Result<String, HerdbookError> {
    match format {
        OutputFormat::Pretty => Ok(format_totals_pretty(totals, &filter.to_string())),
        OutputFormat::Json => format_totals_json(totals, filter),
    }
}

/// Format the district lookup based on output format
///
/// # Errors
///
/// Returns `HerdbookError::Parse` if JSON serialization fails.
pub fn format_districts(
    entries: &[DistrictEntry],
    format: OutputFormat,
) -> Result<String, HerdbookError> {
    match format {
        OutputFormat::Pretty => Ok(format_districts_pretty(entries)),
        OutputFormat::Json => format_districts_json(entries),
    }
}
