//! Application state for the TUI.

use chrono::Datelike;

use crate::error::HerdbookError;
use crate::records::lookup::DISTRICTS;
use crate::records::{Record, RecordFilter, SortOrder, Totals};
use crate::storage::RecordStore;
use crate::tui::form::RecordForm;

/// What the keyboard is currently driving.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Navigating the table.
    Browse,
    /// Typing into the search box.
    Search,
    /// Filling in the entry/edit form.
    Form(RecordForm),
    /// Waiting for a yes/no on deleting this record id.
    ConfirmDelete(i64),
}

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

/// Application state.
pub struct App<'a> {
    /// Storage accessor shared with the rest of the process.
    store: &'a RecordStore,
    /// Records matching the current filter.
    pub records: Vec<Record>,
    /// Totals over the current filter.
    pub totals: Totals,
    /// Currently selected index.
    pub selected: usize,
    /// Ordering of the table.
    pub order: SortOrder,
    /// Index into the district table, if filtering by district.
    pub district_filter: Option<usize>,
    /// Index into the filtered district's communes, if filtering by commune.
    pub commune_filter: Option<usize>,
    /// Free-text search.
    pub search: String,
    pub mode: Mode,
    /// Status message to display.
    pub status: Option<(StatusKind, String)>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Pending 'g' key for 'gg' command.
    pub pending_g: bool,
}

impl<'a> App<'a> {
    /// Create a new app instance and load the first view.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial load fails.
    pub fn new(store: &'a RecordStore, order: SortOrder) -> Result<Self, HerdbookError> {
        let mut app = Self {
            store,
            records: Vec::new(),
            totals: Totals::default(),
            selected: 0,
            order,
            district_filter: None,
            commune_filter: None,
            search: String::new(),
            mode: Mode::Browse,
            status: Some((StatusKind::Info, "Press ? for help".to_string())),
            should_quit: false,
            pending_g: false,
        };
        app.reload()?;
        Ok(app)
    }

    /// The filter described by the current UI state.
    #[must_use]
    pub fn filter(&self) -> RecordFilter {
        let mut filter = RecordFilter::all().text(self.search.as_str());
        if let Some(d) = self.district_filter {
            let (district, communes) = DISTRICTS[d];
            filter = filter.district(district);
            if let Some(c) = self.commune_filter {
                filter = filter.commune(communes[c]);
            }
        }
        filter
    }

    /// Reload records and totals, keeping the same record selected when it
    /// is still visible.
    ///
    /// # Errors
    ///
    /// Returns an error if the queries fail.
    pub fn reload(&mut self) -> Result<(), HerdbookError> {
        let selected_id = self.selected_record().map(|r| r.id);
        let filter = self.filter();

        self.records = self.store.list(&filter, self.order, None)?;
        self.totals = self.store.totals(&filter)?;

        self.selected = selected_id
            .and_then(|id| self.records.iter().position(|r| r.id == id))
            .unwrap_or_else(|| self.selected.min(self.records.len().saturating_sub(1)));

        Ok(())
    }

    /// Reload and report the result on the status line.
    ///
    /// # Errors
    ///
    /// Returns an error if the queries fail.
    pub fn refresh(&mut self) -> Result<(), HerdbookError> {
        self.reload()?;
        self.set_status(
            StatusKind::Info,
            format!("Loaded {} of {} records", self.records.len(), self.totals.records),
        );
        Ok(())
    }

    /// Get the currently selected record.
    pub fn selected_record(&self) -> Option<&Record> {
        self.records.get(self.selected)
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some((kind, text.into()));
    }

    /// Show a failed operation on the status line instead of ending the
    /// session.
    pub fn report(&mut self, err: &HerdbookError) {
        let kind = if err.is_user_facing() {
            StatusKind::Warning
        } else {
            log::debug!("tui operation failed: {err}");
            StatusKind::Error
        };
        let text = match err {
            HerdbookError::Database(_) => format!("Operation failed: {err}"),
            _ => err.to_string(),
        };
        self.set_status(kind, text);
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.pending_g = false;
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if !self.records.is_empty() && self.selected < self.records.len() - 1 {
            self.selected += 1;
        }
        self.pending_g = false;
    }

    /// Jump to first item.
    pub fn select_first(&mut self) {
        self.selected = 0;
        self.pending_g = false;
    }

    /// Jump to last item.
    pub fn select_last(&mut self) {
        if !self.records.is_empty() {
            self.selected = self.records.len() - 1;
        }
        self.pending_g = false;
    }

    /// Handle 'g' key for 'gg' command.
    pub fn handle_g(&mut self) {
        if self.pending_g {
            self.select_first();
        } else {
            self.pending_g = true;
            self.set_status(StatusKind::Info, "g-");
        }
    }

    /// Cancel pending 'g' command.
    pub fn cancel_pending(&mut self) {
        if self.pending_g {
            self.pending_g = false;
            self.status = None;
        }
    }

    /// Step the district filter: none → first district → … → last → none.
    /// The commune filter is cleared since it depends on the district.
    pub fn cycle_district_filter(&mut self) {
        self.district_filter = match self.district_filter {
            None => Some(0),
            Some(d) if d + 1 < DISTRICTS.len() => Some(d + 1),
            Some(_) => None,
        };
        self.commune_filter = None;
    }

    /// Step the commune filter within the filtered district.
    pub fn cycle_commune_filter(&mut self) {
        let Some(d) = self.district_filter else {
            self.set_status(StatusKind::Warning, "Pick a district filter first (f)");
            return;
        };
        let len = DISTRICTS[d].1.len();
        self.commune_filter = match self.commune_filter {
            None => Some(0),
            Some(c) if c + 1 < len => Some(c + 1),
            Some(_) => None,
        };
    }

    pub fn clear_filters(&mut self) {
        self.district_filter = None;
        self.commune_filter = None;
        self.search.clear();
    }

    pub fn toggle_order(&mut self) {
        self.order = match self.order {
            SortOrder::NewestFirst => SortOrder::OldestFirst,
            SortOrder::OldestFirst => SortOrder::NewestFirst,
        };
    }

    /// Open an empty form for a new record.
    pub fn open_new_form(&mut self) {
        let year = i64::from(chrono::Local::now().year());
        self.mode = Mode::Form(RecordForm::new(year));
    }

    /// Open the form on the selected record.
    pub fn open_edit_form(&mut self) {
        if let Some(record) = self.selected_record() {
            self.mode = Mode::Form(RecordForm::from_record(record));
        }
    }

    /// Submit the open form.
    ///
    /// Rejected input stays in the form with an inline message. A missing
    /// record closes the form with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or reload fails.
    pub fn submit_form(&mut self) -> Result<(), HerdbookError> {
        let Mode::Form(form) = &mut self.mode else {
            return Ok(());
        };

        let record = match form.to_record() {
            Ok(record) => record,
            Err(HerdbookError::Validation(msg)) => {
                form.error = Some(msg);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let editing = form.editing;

        let saved = match editing {
            Some(id) => match self.store.update(id, &record) {
                Ok(saved) => saved,
                Err(e @ HerdbookError::NotFound(_)) => {
                    self.mode = Mode::Browse;
                    self.report(&e);
                    return self.reload();
                }
                Err(e) => return Err(e),
            },
            None => self.store.add(&record)?,
        };

        self.mode = Mode::Browse;
        self.reload()?;
        if let Some(index) = self.records.iter().position(|r| r.id == saved.id) {
            self.selected = index;
        }

        let verb = if editing.is_some() { "Updated" } else { "Added" };
        self.set_status(
            StatusKind::Info,
            format!("{verb} #{}: {} / {}", saved.id, saved.district, saved.commune),
        );
        Ok(())
    }

    /// Ask for confirmation before deleting the selected record.
    pub fn request_delete(&mut self) {
        if let Some(record) = self.selected_record() {
            self.mode = Mode::ConfirmDelete(record.id);
        }
    }

    /// Delete the record awaiting confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete or reload fails.
    pub fn confirm_delete(&mut self) -> Result<(), HerdbookError> {
        let Mode::ConfirmDelete(id) = self.mode else {
            return Ok(());
        };
        self.mode = Mode::Browse;

        if self.store.delete(id)? {
            self.reload()?;
            self.set_status(StatusKind::Info, format!("Deleted #{id}"));
        } else {
            self.reload()?;
            self.report(&HerdbookError::NotFound(id));
        }
        Ok(())
    }

    pub fn cancel_mode(&mut self) {
        self.mode = Mode::Browse;
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::records::NewRecord;
    use crate::storage::Database;
    use crate::tui::form::Field;

    fn store() -> (TempDir, RecordStore) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::init_at(&temp_dir.path().join("herdbook.db")).unwrap();
        let store = RecordStore::new(db);
        store.add(&NewRecord::new("Huyện Ba Bể", "Xã Nam Mẫu", 2024)).unwrap();
        store.add(&NewRecord::new("Huyện Ba Bể", "Xã Khang Ninh", 2023)).unwrap();
        store.add(&NewRecord::new("Huyện Na Rì", "Xã Kim Hỷ", 2022)).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_initial_load_newest_first() {
        let (_dir, store) = store();
        let app = App::new(&store, SortOrder::NewestFirst).unwrap();

        assert_eq!(app.records.len(), 3);
        assert_eq!(app.records[0].id, 3);
        assert_eq!(app.totals.records, 3);
    }

    #[test]
    fn test_navigation() {
        let (_dir, store) = store();
        let mut app = App::new(&store, SortOrder::NewestFirst).unwrap();

        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 2);
        app.select_previous();
        assert_eq!(app.selected, 1);
        app.handle_g();
        assert!(app.pending_g);
        app.handle_g();
        assert_eq!(app.selected, 0);
        app.select_last();
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn test_filters() {
        let (_dir, store) = store();
        let mut app = App::new(&store, SortOrder::NewestFirst).unwrap();

        app.cycle_district_filter();
        app.cycle_district_filter();
        assert_eq!(app.filter().district.as_deref(), Some("Huyện Ba Bể"));
        app.reload().unwrap();
        assert_eq!(app.records.len(), 2);

        app.cycle_commune_filter();
        app.cycle_commune_filter();
        assert_eq!(app.filter().commune.as_deref(), Some("Xã Nam Mẫu"));
        app.reload().unwrap();
        assert_eq!(app.records.len(), 1);

        app.cycle_district_filter();
        assert!(app.commune_filter.is_none());

        app.clear_filters();
        app.search = "KIM".to_string();
        app.reload().unwrap();
        assert_eq!(app.records.len(), 1);
        assert_eq!(app.records[0].commune, "Xã Kim Hỷ");
    }

    #[test]
    fn test_commune_filter_needs_district() {
        let (_dir, store) = store();
        let mut app = App::new(&store, SortOrder::NewestFirst).unwrap();

        app.cycle_commune_filter();
        assert!(app.commune_filter.is_none());
        assert!(matches!(app.status, Some((StatusKind::Warning, _))));
    }

    #[test]
    fn test_reload_keeps_selected_id() {
        let (_dir, store) = store();
        let mut app = App::new(&store, SortOrder::NewestFirst).unwrap();
        app.select_next();
        let id = app.selected_record().unwrap().id;

        app.toggle_order();
        app.reload().unwrap();
        assert_eq!(app.selected_record().unwrap().id, id);
    }

    #[test]
    fn test_add_through_form() {
        let (_dir, store) = store();
        let mut app = App::new(&store, SortOrder::NewestFirst).unwrap();

        app.open_new_form();
        if let Mode::Form(form) = &mut app.mode {
            form.set_district(7);
            form.year = "2024".to_string();
            form.goat = "9".to_string();
        }
        app.submit_form().unwrap();

        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(app.records.len(), 4);
        let added = app.selected_record().unwrap();
        assert_eq!(added.id, 4);
        assert_eq!(added.district, "Huyện Pác Nặm");
        assert_eq!(added.commune, "Xã Bộc Bố");
        assert_eq!(added.goat_count, 9);
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let (_dir, store) = store();
        let mut app = App::new(&store, SortOrder::NewestFirst).unwrap();

        app.open_new_form();
        if let Mode::Form(form) = &mut app.mode {
            form.pig = "-1".to_string();
        }
        app.submit_form().unwrap();

        let Mode::Form(form) = &app.mode else {
            panic!("form should stay open");
        };
        assert!(form.error.as_deref().unwrap().contains("pig"));
        assert_eq!(store.count(&RecordFilter::all()).unwrap(), 3);
    }

    #[test]
    fn test_edit_through_form() {
        let (_dir, store) = store();
        let mut app = App::new(&store, SortOrder::NewestFirst).unwrap();

        app.open_edit_form();
        if let Mode::Form(form) = &mut app.mode {
            assert_eq!(form.editing, Some(3));
            form.focus = Field::ALL.iter().position(|f| *f == Field::Cattle).unwrap();
            form.backspace();
            form.push_char('7');
        }
        app.submit_form().unwrap();

        assert_eq!(store.get(3).unwrap().cattle_count, 7);
        assert_eq!(app.selected_record().unwrap().id, 3);
    }

    #[test]
    fn test_edit_keeps_unlisted_location() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::init_at(&temp_dir.path().join("herdbook.db")).unwrap();
        let store = RecordStore::new(db);
        store.add(&NewRecord::new("Huyện Na Rì", "Xã Nam Mẫu", 2024)).unwrap();
        let mut app = App::new(&store, SortOrder::NewestFirst).unwrap();

        app.open_edit_form();
        if let Mode::Form(form) = &mut app.mode {
            form.goat = "9".to_string();
        }
        app.submit_form().unwrap();

        let stored = store.get(1).unwrap();
        assert_eq!(stored.district, "Huyện Na Rì");
        assert_eq!(stored.commune, "Xã Nam Mẫu");
        assert_eq!(stored.goat_count, 9);
    }

    #[test]
    fn test_edit_of_deleted_record_warns() {
        let (_dir, store) = store();
        let mut app = App::new(&store, SortOrder::NewestFirst).unwrap();

        app.open_edit_form();
        store.delete(3).unwrap();
        app.submit_form().unwrap();

        assert_eq!(app.mode, Mode::Browse);
        assert!(matches!(app.status, Some((StatusKind::Warning, _))));
        assert_eq!(app.records.len(), 2);
    }

    #[test]
    fn test_delete_flow() {
        let (_dir, store) = store();
        let mut app = App::new(&store, SortOrder::NewestFirst).unwrap();

        app.request_delete();
        assert_eq!(app.mode, Mode::ConfirmDelete(3));
        app.cancel_mode();
        assert_eq!(store.count(&RecordFilter::all()).unwrap(), 3);

        app.request_delete();
        app.confirm_delete().unwrap();
        assert_eq!(app.records.len(), 2);
        assert!(store.get(3).is_err());
    }

    #[test]
    fn test_report_storage_error() {
        let (_dir, store) = store();
        let mut app = App::new(&store, SortOrder::NewestFirst).unwrap();

        app.report(&HerdbookError::Database("disk full".to_string()));
        let (kind, text) = app.status.clone().unwrap();
        assert_eq!(kind, StatusKind::Error);
        assert!(text.starts_with("Operation failed"));
    }
}
