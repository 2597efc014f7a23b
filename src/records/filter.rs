//! Record filtering.
//!
//! A [`RecordFilter`] is the single predicate shared by list, count and
//! totals queries. District and commune are exact matches; the free text is
//! a case-insensitive substring match against district or commune. Present
//! predicates are combined with AND.

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use super::types::NewRecord;

/// SQL function registered on every connection to lowercase Unicode text.
pub const FOLD_FUNCTION: &str = "herdbook_fold";

/// Filter over stored records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub commune: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl RecordFilter {
    /// A filter that matches every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn district(mut self, district: impl Into<String>) -> Self {
        self.district = non_empty(district.into());
        self
    }

    #[must_use]
    pub fn commune(mut self, commune: impl Into<String>) -> Self {
        self.commune = non_empty(commune.into());
        self
    }

    /// Free-text needle. Blank text is ignored; otherwise it is kept
    /// exactly as typed, surrounding spaces included.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = (!text.trim().is_empty()).then_some(text);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.district.is_none() && self.commune.is_none() && self.text.is_none()
    }

    /// Check a record against the filter without going through SQL.
    #[must_use]
    pub fn matches(&self, record: &NewRecord) -> bool {
        if let Some(district) = &self.district {
            if &record.district != district {
                return false;
            }
        }
        if let Some(commune) = &self.commune {
            if &record.commune != commune {
                return false;
            }
        }
        if let Some(text) = &self.text {
            let needle = fold(text);
            return fold(&record.district).contains(&needle)
                || fold(&record.commune).contains(&needle);
        }
        true
    }

    /// Render the filter as a SQL `WHERE` clause (empty when unfiltered) and
    /// its positional parameters.
    pub(crate) fn to_sql(&self) -> (String, Vec<Value>) {
        let mut clauses = Vec::new();
        let mut params = Vec::new();

        if let Some(district) = &self.district {
            clauses.push("district = ?".to_string());
            params.push(Value::Text(district.clone()));
        }
        if let Some(commune) = &self.commune {
            clauses.push("commune = ?".to_string());
            params.push(Value::Text(commune.clone()));
        }
        if let Some(text) = &self.text {
            clauses.push(format!(
                "(instr({FOLD_FUNCTION}(district), ?) > 0 OR instr({FOLD_FUNCTION}(commune), ?) > 0)"
            ));
            let needle = fold(text);
            params.push(Value::Text(needle.clone()));
            params.push(Value::Text(needle));
        }

        if clauses.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", clauses.join(" AND ")), params)
        }
    }
}

impl std::fmt::Display for RecordFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if let Some(district) = &self.district {
            parts.push(format!("district = {district}"));
        }
        if let Some(commune) = &self.commune {
            parts.push(format!("commune = {commune}"));
        }
        if let Some(text) = &self.text {
            parts.push(format!("text ~ \"{text}\""));
        }
        if parts.is_empty() {
            write!(f, "all records")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// Case folding used on both sides of the text match.
#[must_use]
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(district: &str, commune: &str) -> NewRecord {
        NewRecord::new(district, commune, 2024)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = RecordFilter::all();
        assert!(filter.is_empty());
        assert!(filter.matches(&record("Huyện Ba Bể", "Xã Nam Mẫu")));
        assert_eq!(filter.to_sql().0, "");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let filter = RecordFilter::all().district("  ").text("");
        assert!(filter.is_empty());
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let r = record("Ba Be", "Cho Ra");
        assert!(RecordFilter::all().text("ba").matches(&r));
        assert!(RecordFilter::all().text("BE").matches(&r));
        assert!(RecordFilter::all().text("ra").matches(&r));
        assert!(!RecordFilter::all().text("xyz").matches(&r));
    }

    #[test]
    fn test_text_keeps_surrounding_spaces() {
        let filter = RecordFilter::all().text("Ba ");
        assert_eq!(filter.text.as_deref(), Some("Ba "));
        assert!(filter.matches(&record("Huyện Ba Bể", "Xã Nam Mẫu")));
        assert!(!filter.matches(&record("Huyện Chợ Ba", "Xã Kim Hỷ")));

        let (_, params) = filter.to_sql();
        assert!(params.contains(&Value::Text("ba ".to_string())));

        assert!(RecordFilter::all().text("   ").is_empty());
    }

    #[test]
    fn test_text_folds_diacritics_case() {
        let r = record("Huyện Ba Bể", "Xã Nam Mẫu");
        assert!(RecordFilter::all().text("huyện").matches(&r));
        assert!(RecordFilter::all().text("NAM MẪU").matches(&r));
    }

    #[test]
    fn test_combined_filter_is_and() {
        let filter = RecordFilter::all()
            .district("Huyện Ba Bể")
            .commune("Xã Nam Mẫu")
            .text("nam");

        assert!(filter.matches(&record("Huyện Ba Bể", "Xã Nam Mẫu")));
        assert!(!filter.matches(&record("Huyện Ba Bể", "Xã Khang Ninh")));
        assert!(!filter.matches(&record("Huyện Na Rì", "Xã Nam Mẫu")));

        let (clause, params) = filter.to_sql();
        assert_eq!(clause.matches(" AND ").count(), 2);
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(RecordFilter::all().to_string(), "all records");
        assert_eq!(
            RecordFilter::all().district("Huyện Na Rì").text("kim").to_string(),
            "district = Huyện Na Rì, text ~ \"kim\""
        );
    }
}
