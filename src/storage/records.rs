//! Livestock record storage.
//!
//! CRUD over the `livestock_records` table. Each call opens its own
//! connection through [`Database::connect`]; nothing is held between calls.

use rand::Rng;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use crate::error::HerdbookError;
use crate::records::{seed, NewRecord, Page, Record, RecordFilter, SortOrder, Totals};

use super::Database;

const COLUMNS: &str = "id, district, commune, year, buffalo_count, cattle_count, \
                       pig_count, goat_count, slaughter_total, meat_output_tons";

/// Storage accessor for livestock records.
#[derive(Debug, Clone)]
pub struct RecordStore {
    db: Database,
}

impl RecordStore {
    /// Create a store over an initialized database.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// The underlying database handle.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// List records matching a filter.
    ///
    /// `page` of `None` returns every matching row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(
        &self,
        filter: &RecordFilter,
        order: SortOrder,
        page: Option<Page>,
    ) -> Result<Vec<Record>, HerdbookError> {
        let conn = self.db.connect()?;

        let (clause, mut values) = filter.to_sql();
        let mut sql = format!(
            "SELECT {COLUMNS} FROM livestock_records{clause} ORDER BY id {}",
            order.sql()
        );
        if let Some(page) = page {
            sql.push_str(" LIMIT ? OFFSET ?");
            values.push(Value::Integer(i64::from(page.size)));
            values.push(Value::Integer(
                i64::try_from(page.offset()).unwrap_or(i64::MAX),
            ));
        }

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| HerdbookError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params_from_iter(values.iter()), row_to_record)
            .map_err(|e| HerdbookError::Database(format!("Failed to query records: {e}")))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| HerdbookError::Database(e.to_string()))?);
        }

        Ok(records)
    }

    /// Count records matching a filter, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self, filter: &RecordFilter) -> Result<u64, HerdbookError> {
        let conn = self.db.connect()?;
        let (clause, values) = filter.to_sql();

        let count: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM livestock_records{clause}"),
                params_from_iter(values.iter()),
                |row| row.get(0),
            )
            .map_err(|e| HerdbookError::Database(format!("Failed to count records: {e}")))?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Get a record by id.
    ///
    /// # Errors
    ///
    /// Returns `HerdbookError::NotFound` if no record has this id.
    pub fn get(&self, id: i64) -> Result<Record, HerdbookError> {
        let conn = self.db.connect()?;

        conn.query_row(
            &format!("SELECT {COLUMNS} FROM livestock_records WHERE id = ?1"),
            [id],
            row_to_record,
        )
        .optional()
        .map_err(|e| HerdbookError::Database(format!("Failed to query record {id}: {e}")))?
        .ok_or(HerdbookError::NotFound(id))
    }

    /// Insert a record and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add(&self, record: &NewRecord) -> Result<Record, HerdbookError> {
        let conn = self.db.connect()?;

        conn.execute(
            r"INSERT INTO livestock_records
              (district, commune, year, buffalo_count, cattle_count, pig_count,
               goat_count, slaughter_total, meat_output_tons)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                record.district,
                record.commune,
                record.year,
                record.buffalo_count,
                record.cattle_count,
                record.pig_count,
                record.goat_count,
                record.slaughter_total,
                record.meat_output_tons,
            ],
        )
        .map_err(|e| HerdbookError::Database(format!("Failed to insert record: {e}")))?;

        let id = conn.last_insert_rowid();
        log::debug!("Added record {id} ({} / {})", record.district, record.commune);

        Ok(Record {
            id,
            fields: record.clone(),
        })
    }

    /// Overwrite every field of an existing record, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns `HerdbookError::NotFound` if no record has this id.
    pub fn update(&self, id: i64, record: &NewRecord) -> Result<Record, HerdbookError> {
        let conn = self.db.connect()?;

        let changed = conn
            .execute(
                r"UPDATE livestock_records SET
                  district = ?1,
                  commune = ?2,
                  year = ?3,
                  buffalo_count = ?4,
                  cattle_count = ?5,
                  pig_count = ?6,
                  goat_count = ?7,
                  slaughter_total = ?8,
                  meat_output_tons = ?9
                  WHERE id = ?10",
                params![
                    record.district,
                    record.commune,
                    record.year,
                    record.buffalo_count,
                    record.cattle_count,
                    record.pig_count,
                    record.goat_count,
                    record.slaughter_total,
                    record.meat_output_tons,
                    id,
                ],
            )
            .map_err(|e| HerdbookError::Database(format!("Failed to update record {id}: {e}")))?;

        if changed == 0 {
            return Err(HerdbookError::NotFound(id));
        }

        log::debug!("Updated record {id}");
        Ok(Record {
            id,
            fields: record.clone(),
        })
    }

    /// Delete a record. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails; a missing id is not an error.
    pub fn delete(&self, id: i64) -> Result<bool, HerdbookError> {
        let conn = self.db.connect()?;

        let changed = conn
            .execute("DELETE FROM livestock_records WHERE id = ?1", [id])
            .map_err(|e| HerdbookError::Database(format!("Failed to delete record {id}: {e}")))?;

        if changed > 0 {
            log::debug!("Deleted record {id}");
        }
        Ok(changed > 0)
    }

    /// Aggregate figures over the records matching a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn totals(&self, filter: &RecordFilter) -> Result<Totals, HerdbookError> {
        let conn = self.db.connect()?;
        let (clause, values) = filter.to_sql();

        conn.query_row(
            &format!(
                r"SELECT COUNT(*),
                         COALESCE(SUM(buffalo_count), 0),
                         COALESCE(SUM(cattle_count), 0),
                         COALESCE(SUM(pig_count), 0),
                         COALESCE(SUM(goat_count), 0),
                         COALESCE(SUM(slaughter_total), 0),
                         COALESCE(SUM(meat_output_tons), 0.0)
                  FROM livestock_records{clause}"
            ),
            params_from_iter(values.iter()),
            |row| {
                let records: i64 = row.get(0)?;
                let meat: f64 = row.get(6)?;
                Ok(Totals {
                    records: u64::try_from(records).unwrap_or_default(),
                    buffalo_count: row.get(1)?,
                    cattle_count: row.get(2)?,
                    pig_count: row.get(3)?,
                    goat_count: row.get(4)?,
                    slaughter_total: row.get(5)?,
                    meat_output_tons: seed::round2(meat),
                })
            },
        )
        .map_err(|e| HerdbookError::Database(format!("Failed to compute totals: {e}")))
    }

    /// Replace the whole table with the given records.
    ///
    /// Clears every row and resets the id counter so the new rows are
    /// numbered from 1. Runs in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; the table is left unchanged.
    pub fn replace_all(&self, records: &[NewRecord]) -> Result<usize, HerdbookError> {
        let mut conn = self.db.connect()?;
        let tx = conn
            .transaction()
            .map_err(|e| HerdbookError::Database(format!("Failed to begin transaction: {e}")))?;

        tx.execute("DELETE FROM livestock_records", [])
            .map_err(|e| HerdbookError::Database(format!("Failed to clear records: {e}")))?;
        tx.execute(
            "DELETE FROM sqlite_sequence WHERE name = 'livestock_records'",
            [],
        )
        .map_err(|e| HerdbookError::Database(format!("Failed to reset id sequence: {e}")))?;

        {
            let mut stmt = tx
                .prepare(
                    r"INSERT INTO livestock_records
                      (district, commune, year, buffalo_count, cattle_count, pig_count,
                       goat_count, slaughter_total, meat_output_tons)
                      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                )
                .map_err(|e| HerdbookError::Database(format!("Failed to prepare insert: {e}")))?;

            for record in records {
                stmt.execute(params![
                    record.district,
                    record.commune,
                    record.year,
                    record.buffalo_count,
                    record.cattle_count,
                    record.pig_count,
                    record.goat_count,
                    record.slaughter_total,
                    record.meat_output_tons,
                ])
                .map_err(|e| HerdbookError::Database(format!("Failed to insert record: {e}")))?;
            }
        }

        tx.commit()
            .map_err(|e| HerdbookError::Database(format!("Failed to commit: {e}")))?;

        Ok(records.len())
    }

    /// Destructively replace all data with `count` generated sample records.
    ///
    /// # Errors
    ///
    /// Returns an error if the replacement fails.
    pub fn reseed<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<usize, HerdbookError> {
        let records = seed::generate(count, rng);
        let inserted = self.replace_all(&records)?;
        log::info!(
            "Reseeded {} with {inserted} sample records",
            self.db.path().display()
        );
        Ok(inserted)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        fields: NewRecord {
            district: row.get(1)?,
            commune: row.get(2)?,
            year: row.get(3)?,
            buffalo_count: row.get(4)?,
            cattle_count: row.get(5)?,
            pig_count: row.get(6)?,
            goat_count: row.get(7)?,
            slaughter_total: row.get(8)?,
            meat_output_tons: row.get(9)?,
        },
    })
}
