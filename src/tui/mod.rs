//! Terminal User Interface (TUI) for herdbook.
//!
//! Provides an interactive table with filters, search and an entry form.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod form;
mod ui;

pub use app::App;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::HerdbookError;
use crate::records::SortOrder;
use crate::storage::RecordStore;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(store: &RecordStore, order: SortOrder) -> Result<(), HerdbookError> {
    // Load before touching the terminal so a bad database reports normally
    let mut app = App::new(store, order)?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| HerdbookError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| HerdbookError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let result = Terminal::new(backend)
        .map_err(|e| HerdbookError::Terminal(format!("Failed to create terminal: {e}")))
        .and_then(|mut terminal| {
            let result = run_app(&mut terminal, &mut app);
            terminal.show_cursor().ok();
            result
        });

    // Restore terminal
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<'_>) -> Result<(), HerdbookError> {
    loop {
        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| HerdbookError::Terminal(format!("Failed to draw: {e}")))?;

        // Handle events
        if let Some(action) = event::handle_events(app)? {
            let outcome = match action {
                event::Action::Quit => break,
                event::Action::Refresh => app.refresh(),
                event::Action::Reload => app.reload(),
                event::Action::SubmitForm => app.submit_form(),
                event::Action::ConfirmDelete => app.confirm_delete(),
            };
            if let Err(e) = outcome {
                app.report(&e);
            }
        }
    }

    Ok(())
}
