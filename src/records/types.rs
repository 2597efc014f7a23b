use serde::{Deserialize, Serialize};

use crate::error::HerdbookError;

/// Earliest reporting year accepted by the entry form.
pub const MIN_YEAR: i64 = 1990;
/// Latest reporting year accepted by the entry form.
pub const MAX_YEAR: i64 = 2100;
/// Largest headcount or slaughter figure a single record may carry.
pub const MAX_COUNT: i64 = 1_000_000_000;

/// One district-commune-year observation, without its storage id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub district: String,
    pub commune: String,
    pub year: i64,
    #[serde(default)]
    pub buffalo_count: i64,
    #[serde(default)]
    pub cattle_count: i64,
    #[serde(default)]
    pub pig_count: i64,
    #[serde(default)]
    pub goat_count: i64,
    #[serde(default)]
    pub slaughter_total: i64,
    #[serde(default)]
    pub meat_output_tons: f64,
}

impl NewRecord {
    /// Create a record for a location and year with all figures at zero.
    #[must_use]
    pub fn new(district: impl Into<String>, commune: impl Into<String>, year: i64) -> Self {
        Self {
            district: district.into(),
            commune: commune.into(),
            year,
            buffalo_count: 0,
            cattle_count: 0,
            pig_count: 0,
            goat_count: 0,
            slaughter_total: 0,
            meat_output_tons: 0.0,
        }
    }

    /// Sum of the four species headcounts.
    #[must_use]
    pub const fn total_headcount(&self) -> i64 {
        self.buffalo_count
            .saturating_add(self.cattle_count)
            .saturating_add(self.pig_count)
            .saturating_add(self.goat_count)
    }

    /// Check the rules the entry form enforces before anything is stored.
    ///
    /// # Errors
    ///
    /// Returns `HerdbookError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), HerdbookError> {
        if self.district.trim().is_empty() {
            return Err(HerdbookError::Validation("district must not be empty".to_string()));
        }
        if self.commune.trim().is_empty() {
            return Err(HerdbookError::Validation("commune must not be empty".to_string()));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(HerdbookError::Validation(format!(
                "year must be between {MIN_YEAR} and {MAX_YEAR}, got {}",
                self.year
            )));
        }

        let counts = [
            ("buffalo", self.buffalo_count),
            ("cattle", self.cattle_count),
            ("pig", self.pig_count),
            ("goat", self.goat_count),
            ("slaughter", self.slaughter_total),
        ];
        for (name, value) in counts {
            if value < 0 {
                return Err(HerdbookError::Validation(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
            if value > MAX_COUNT {
                return Err(HerdbookError::Validation(format!(
                    "{name} must be at most {MAX_COUNT}, got {value}"
                )));
            }
        }

        if !self.meat_output_tons.is_finite() || self.meat_output_tons < 0.0 {
            return Err(HerdbookError::Validation(format!(
                "meat output must be a non-negative number, got {}",
                self.meat_output_tons
            )));
        }

        Ok(())
    }
}

/// A stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    #[serde(flatten)]
    pub fields: NewRecord,
}

impl std::ops::Deref for Record {
    type Target = NewRecord;

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

/// Aggregate figures over a set of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub records: u64,
    pub buffalo_count: i64,
    pub cattle_count: i64,
    pub pig_count: i64,
    pub goat_count: i64,
    pub slaughter_total: i64,
    pub meat_output_tons: f64,
}

impl Totals {
    #[must_use]
    pub const fn total_headcount(&self) -> i64 {
        self.buffalo_count
            .saturating_add(self.cattle_count)
            .saturating_add(self.pig_count)
            .saturating_add(self.goat_count)
    }
}

/// Order in which list views return records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Highest id first.
    #[default]
    NewestFirst,
    /// Lowest id first.
    OldestFirst,
}

impl SortOrder {
    pub(crate) const fn sql(self) -> &'static str {
        match self {
            Self::NewestFirst => "DESC",
            Self::OldestFirst => "ASC",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewestFirst => write!(f, "newest first"),
            Self::OldestFirst => write!(f, "oldest first"),
        }
    }
}

/// A 1-based page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    /// Build a page, clamping the number and size to at least 1.
    #[must_use]
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }

    #[must_use]
    pub const fn offset(self) -> u64 {
        (self.number as u64 - 1) * self.size as u64
    }

    /// Number of pages needed to show `total` rows.
    #[must_use]
    pub const fn page_count(self, total: u64) -> u64 {
        total.div_ceil(self.size as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewRecord {
        NewRecord {
            buffalo_count: 10,
            cattle_count: 20,
            pig_count: 30,
            goat_count: 5,
            slaughter_total: 15,
            meat_output_tons: 1.2,
            ..NewRecord::new("Huyện Ba Bể", "Xã Nam Mẫu", 2024)
        }
    }

    #[test]
    fn test_valid_record() {
        assert!(sample().validate().is_ok());
        assert_eq!(sample().total_headcount(), 65);
    }

    #[test]
    fn test_negative_count_rejected() {
        let record = NewRecord {
            pig_count: -1,
            ..sample()
        };
        let err = record.validate().unwrap_err();
        assert!(matches!(err, HerdbookError::Validation(ref msg) if msg.contains("pig")));
    }

    #[test]
    fn test_oversized_count_rejected() {
        let record = NewRecord {
            pig_count: i64::MAX,
            goat_count: 1,
            ..sample()
        };
        let err = record.validate().unwrap_err();
        assert!(matches!(err, HerdbookError::Validation(ref msg) if msg.contains("pig")));

        assert!(NewRecord { cattle_count: MAX_COUNT, ..sample() }.validate().is_ok());
    }

    #[test]
    fn test_total_headcount_saturates() {
        let record = NewRecord {
            pig_count: i64::MAX,
            goat_count: 1,
            ..sample()
        };
        assert_eq!(record.total_headcount(), i64::MAX);

        let totals = Totals {
            buffalo_count: i64::MAX,
            cattle_count: i64::MAX,
            ..Totals::default()
        };
        assert_eq!(totals.total_headcount(), i64::MAX);
    }

    #[test]
    fn test_negative_meat_rejected() {
        let record = NewRecord {
            meat_output_tons: -0.5,
            ..sample()
        };
        assert!(record.validate().is_err());

        let record = NewRecord {
            meat_output_tons: f64::NAN,
            ..sample()
        };
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_year_range() {
        assert!(NewRecord { year: 1989, ..sample() }.validate().is_err());
        assert!(NewRecord { year: 1990, ..sample() }.validate().is_ok());
        assert!(NewRecord { year: 2100, ..sample() }.validate().is_ok());
        assert!(NewRecord { year: 2101, ..sample() }.validate().is_err());
    }

    #[test]
    fn test_empty_location_rejected() {
        assert!(NewRecord::new("", "Xã Nam Mẫu", 2024).validate().is_err());
        assert!(NewRecord::new("Huyện Ba Bể", "  ", 2024).validate().is_err());
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = Record { id: 7, fields: sample() };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["district"], "Huyện Ba Bể");
        assert_eq!(json["goat_count"], 5);
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(Page::new(1, 10).offset(), 0);
        assert_eq!(Page::new(3, 10).offset(), 20);
        assert_eq!(Page::new(0, 0), Page::new(1, 1));
        assert_eq!(Page::new(1, 10).page_count(0), 0);
        assert_eq!(Page::new(1, 10).page_count(21), 3);
    }
}
