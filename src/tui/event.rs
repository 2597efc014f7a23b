//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::HerdbookError;
use crate::tui::app::{App, Mode, StatusKind};

const HELP: &str = "j/k:nav | a:add | e:edit | d:delete | /:search | f:district | c:commune \
                    | x:clear | o:order | r:refresh | q:quit";

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Reload the table and report the count.
    Refresh,
    /// Reload the table quietly after a filter or order change.
    Reload,
    /// Save the open form.
    SubmitForm,
    /// Delete the record awaiting confirmation.
    ConfirmDelete,
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App<'_>) -> Result<Option<Action>, HerdbookError> {
    // Poll for events with a small timeout
    if event::poll(Duration::from_millis(100))
        .map_err(|e| HerdbookError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| HerdbookError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key(app, key));
            }
        }
    }

    Ok(None)
}

/// Apply a key press to the app according to its mode.
pub fn handle_key(app: &mut App<'_>, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match app.mode {
        Mode::Browse => handle_browse(app, key.code),
        Mode::Search => handle_search(app, key.code),
        Mode::Form(_) => handle_form(app, key.code),
        Mode::ConfirmDelete(_) => match key.code {
            KeyCode::Char('y' | 'Y') => Some(Action::ConfirmDelete),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                app.cancel_mode();
                app.set_status(StatusKind::Info, "Delete cancelled");
                None
            }
            _ => None,
        },
    }
}

fn handle_browse(app: &mut App<'_>, code: KeyCode) -> Option<Action> {
    if code != KeyCode::Char('g') {
        app.cancel_pending();
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),

        // Navigation - vim style
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') => app.handle_g(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Home => app.select_first(),

        // Records
        KeyCode::Char('a' | 'n') => app.open_new_form(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),

        // Filters
        KeyCode::Char('/') => app.mode = Mode::Search,
        KeyCode::Char('f') => {
            app.cycle_district_filter();
            return Some(Action::Reload);
        }
        KeyCode::Char('c') => {
            app.cycle_commune_filter();
            return Some(Action::Reload);
        }
        KeyCode::Char('x') => {
            app.clear_filters();
            return Some(Action::Reload);
        }
        KeyCode::Char('o') => {
            app.toggle_order();
            app.set_status(StatusKind::Info, format!("Order: {}", app.order));
            return Some(Action::Reload);
        }

        KeyCode::Char('r') => return Some(Action::Refresh),
        KeyCode::Char('?') => app.set_status(StatusKind::Info, HELP),
        _ => {}
    }
    None
}

fn handle_search(app: &mut App<'_>, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Enter | KeyCode::Esc => {
            app.cancel_mode();
            None
        }
        KeyCode::Backspace => {
            app.search.pop();
            Some(Action::Reload)
        }
        KeyCode::Char(c) => {
            app.search.push(c);
            Some(Action::Reload)
        }
        _ => None,
    }
}

fn handle_form(app: &mut App<'_>, code: KeyCode) -> Option<Action> {
    let Mode::Form(form) = &mut app.mode else {
        return None;
    };

    match code {
        KeyCode::Esc => {
            app.cancel_mode();
            app.set_status(StatusKind::Info, "Edit cancelled");
        }
        KeyCode::Enter => return Some(Action::SubmitForm),
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
        KeyCode::Right => form.cycle(true),
        KeyCode::Left => form.cycle(false),
        KeyCode::Char(' ') if form.focused().is_choice() => form.cycle(true),
        KeyCode::Char(c) => form.push_char(c),
        KeyCode::Backspace => form.backspace(),
        _ => {}
    }
    None
}
