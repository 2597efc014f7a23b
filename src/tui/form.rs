//! Entry/edit form state for the TUI.
//!
//! The form is a view model keyed by the id of the record it edits (`None`
//! for a new record). District and commune are picked from the lookup table;
//! the other fields are edited as text and parsed on submit. A stored
//! location missing from the lookup table is kept as-is until the user picks
//! another one.

use crate::error::HerdbookError;
use crate::records::lookup::DISTRICTS;
use crate::records::{NewRecord, Record};

/// Form fields in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    District,
    Commune,
    Year,
    Buffalo,
    Cattle,
    Pig,
    Goat,
    Slaughter,
    Meat,
}

impl Field {
    pub const ALL: [Self; 9] = [
        Self::District,
        Self::Commune,
        Self::Year,
        Self::Buffalo,
        Self::Cattle,
        Self::Pig,
        Self::Goat,
        Self::Slaughter,
        Self::Meat,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::District => "District",
            Self::Commune => "Commune",
            Self::Year => "Year",
            Self::Buffalo => "Buffalo (head)",
            Self::Cattle => "Cattle (head)",
            Self::Pig => "Pig (head)",
            Self::Goat => "Goat (head)",
            Self::Slaughter => "Slaughtered (head)",
            Self::Meat => "Meat output (t)",
        }
    }

    /// Whether the field is chosen from a list rather than typed.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::District | Self::Commune)
    }
}

/// State of the entry/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordForm {
    /// Id of the record being edited, `None` when adding.
    pub editing: Option<i64>,
    /// Index into the district table.
    pub district: usize,
    /// Index into the selected district's communes.
    pub commune: usize,
    /// Stored district and commune that the lookup table does not list.
    /// Takes precedence over the indices until a choice is changed.
    pub unlisted: Option<(String, String)>,
    pub year: String,
    pub buffalo: String,
    pub cattle: String,
    pub pig: String,
    pub goat: String,
    pub slaughter: String,
    pub meat: String,
    /// Index into [`Field::ALL`] of the focused field.
    pub focus: usize,
    /// Inline message for rejected input.
    pub error: Option<String>,
}

impl RecordForm {
    /// Empty form for a new record.
    #[must_use]
    pub fn new(year: i64) -> Self {
        Self {
            editing: None,
            district: 0,
            commune: 0,
            unlisted: None,
            year: year.to_string(),
            buffalo: "0".to_string(),
            cattle: "0".to_string(),
            pig: "0".to_string(),
            goat: "0".to_string(),
            slaughter: "0".to_string(),
            meat: "0.00".to_string(),
            focus: 0,
            error: None,
        }
    }

    /// Form prefilled from a stored record.
    ///
    /// A location missing from the lookup table is kept in `unlisted`; the
    /// indices then point at the closest listed choice.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        let district = DISTRICTS
            .iter()
            .position(|(name, _)| *name == record.district);
        let commune = district.and_then(|d| {
            DISTRICTS[d]
                .1
                .iter()
                .position(|name| *name == record.commune)
        });

        let unlisted = if district.is_none() || commune.is_none() {
            Some((record.district.clone(), record.commune.clone()))
        } else {
            None
        };

        Self {
            editing: Some(record.id),
            district: district.unwrap_or(0),
            commune: commune.unwrap_or(0),
            unlisted,
            year: record.year.to_string(),
            buffalo: record.buffalo_count.to_string(),
            cattle: record.cattle_count.to_string(),
            pig: record.pig_count.to_string(),
            goat: record.goat_count.to_string(),
            slaughter: record.slaughter_total.to_string(),
            meat: format!("{:.2}", record.meat_output_tons),
            focus: 0,
            error: None,
        }
    }

    #[must_use]
    pub fn district_name(&self) -> &str {
        match &self.unlisted {
            Some((district, _)) => district.as_str(),
            None => DISTRICTS[self.district].0,
        }
    }

    /// Communes offered for the selected district.
    #[must_use]
    pub fn communes(&self) -> &'static [&'static str] {
        DISTRICTS[self.district].1
    }

    #[must_use]
    pub fn commune_name(&self) -> &str {
        match &self.unlisted {
            Some((_, commune)) => commune.as_str(),
            None => self.communes()[self.commune],
        }
    }

    #[must_use]
    pub fn focused(&self) -> Field {
        Field::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Field::ALL.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
    }

    /// Select a district, keeping the commune only if the new district
    /// lists it; otherwise the first commune is selected.
    pub fn set_district(&mut self, index: usize) {
        let index = index % DISTRICTS.len();
        let previous = self.commune_name().to_string();

        self.unlisted = None;
        self.district = index;
        self.commune = self
            .communes()
            .iter()
            .position(|name| *name == previous)
            .unwrap_or(0);
    }

    /// Step the focused choice field forward or backward.
    pub fn cycle(&mut self, forward: bool) {
        match self.focused() {
            Field::District => {
                let len = DISTRICTS.len();
                let next = if forward {
                    self.district + 1
                } else {
                    self.district + len - 1
                };
                self.set_district(next % len);
            }
            Field::Commune => {
                // The first step away from an unlisted commune lands on the
                // closest listed one.
                if self.unlisted.take().is_some() {
                    return;
                }
                let len = self.communes().len();
                self.commune = if forward {
                    (self.commune + 1) % len
                } else {
                    (self.commune + len - 1) % len
                };
            }
            _ => {}
        }
    }

    /// Type a character into the focused text field.
    pub fn push_char(&mut self, c: char) {
        let field = self.focused();
        let accepted = match field {
            Field::Meat => c.is_ascii_digit() || c == '.' || c == '-',
            _ => c.is_ascii_digit() || c == '-',
        };
        if accepted {
            if let Some(text) = self.text_mut(field) {
                text.push(c);
            }
        }
    }

    /// Remove the last character of the focused text field.
    pub fn backspace(&mut self) {
        let field = self.focused();
        if let Some(text) = self.text_mut(field) {
            text.pop();
        }
    }

    /// Display value of a field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::District => self.district_name(),
            Field::Commune => self.commune_name(),
            Field::Year => &self.year,
            Field::Buffalo => &self.buffalo,
            Field::Cattle => &self.cattle,
            Field::Pig => &self.pig,
            Field::Goat => &self.goat,
            Field::Slaughter => &self.slaughter,
            Field::Meat => &self.meat,
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::District | Field::Commune => None,
            Field::Year => Some(&mut self.year),
            Field::Buffalo => Some(&mut self.buffalo),
            Field::Cattle => Some(&mut self.cattle),
            Field::Pig => Some(&mut self.pig),
            Field::Goat => Some(&mut self.goat),
            Field::Slaughter => Some(&mut self.slaughter),
            Field::Meat => Some(&mut self.meat),
        }
    }

    /// Parse and validate the form into a record.
    ///
    /// # Errors
    ///
    /// Returns `HerdbookError::Validation` for missing, malformed or
    /// out-of-range values.
    pub fn to_record(&self) -> Result<NewRecord, HerdbookError> {
        let record = NewRecord {
            district: self.district_name().to_string(),
            commune: self.commune_name().to_string(),
            year: parse_int(Field::Year, &self.year)?,
            buffalo_count: parse_int(Field::Buffalo, &self.buffalo)?,
            cattle_count: parse_int(Field::Cattle, &self.cattle)?,
            pig_count: parse_int(Field::Pig, &self.pig)?,
            goat_count: parse_int(Field::Goat, &self.goat)?,
            slaughter_total: parse_int(Field::Slaughter, &self.slaughter)?,
            meat_output_tons: parse_float(Field::Meat, &self.meat)?,
        };
        record.validate()?;
        Ok(record)
    }
}

fn parse_int(field: Field, text: &str) -> Result<i64, HerdbookError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(HerdbookError::Validation(format!("{} is required", field.label())));
    }
    text.parse().map_err(|_| {
        HerdbookError::Validation(format!("{} must be a whole number", field.label()))
    })
}

fn parse_float(field: Field, text: &str) -> Result<f64, HerdbookError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(HerdbookError::Validation(format!("{} is required", field.label())));
    }
    text.parse()
        .map_err(|_| HerdbookError::Validation(format!("{} must be a number", field.label())))
}
