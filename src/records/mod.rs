//! Livestock record model.
//!
//! The data shapes shared by storage and the presentation layers, the
//! district/commune lookup table and the sample data generator.

pub mod filter;
pub mod lookup;
pub mod seed;
pub mod types;

pub use filter::RecordFilter;
pub use types::{NewRecord, Page, Record, SortOrder, Totals, MAX_COUNT, MAX_YEAR, MIN_YEAR};
