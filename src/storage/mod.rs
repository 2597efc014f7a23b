//! Storage layer for herdbook.
//!
//! A single `SQLite` file holds the `livestock_records` table. The schema is
//! created by an explicit initialization step at startup; each operation then
//! uses its own short-lived connection.

mod database;
mod migrations;
mod records;

pub use database::Database;
pub use records::RecordStore;
