//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::tui::app::{App, Mode, StatusKind};
use crate::tui::form::{Field, RecordForm};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App<'_>) {
    // Create layout: header, table, totals, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Totals
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_table(frame, app, chunks[1]);
    render_totals(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    match &app.mode {
        Mode::Form(form) => render_form(frame, form),
        Mode::ConfirmDelete(id) => render_confirm(frame, *id),
        Mode::Browse | Mode::Search => {}
    }
}

/// Render the header with the active filter.
fn render_header(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ({} records, {}) ", app.filter(), app.records.len(), app.order),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if app.mode == Mode::Search {
        spans.push(Span::styled(
            format!(" /{}_", app.search),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

/// Render the record table.
fn render_table(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let header = Row::new([
        "ID", "District", "Commune", "Year", "Buffalo", "Cattle", "Pig", "Goat", "Slaughter",
        "Meat (t)",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = app.records.iter().map(|record| {
        Row::new([
            Cell::from(record.id.to_string()).style(Style::default().fg(Color::DarkGray)),
            Cell::from(record.district.as_str()),
            Cell::from(record.commune.as_str()),
            Cell::from(record.year.to_string()),
            Cell::from(record.buffalo_count.to_string()),
            Cell::from(record.cattle_count.to_string()),
            Cell::from(record.pig_count.to_string()),
            Cell::from(record.goat_count.to_string()),
            Cell::from(record.slaughter_total.to_string()),
            Cell::from(format!("{:.2}", record.meat_output_tons))
                .style(Style::default().fg(Color::Green)),
        ])
    });

    let widths = [
        Constraint::Length(5),
        Constraint::Min(18),
        Constraint::Min(16),
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(10),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = TableState::default();
    if !app.records.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

/// Render totals over the current filter.
fn render_totals(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let t = &app.totals;
    let text = format!(
        " Buffalo {} | Cattle {} | Pig {} | Goat {} | Herd {} | Slaughter {} | Meat {:.2} t",
        t.buffalo_count,
        t.cattle_count,
        t.pig_count,
        t.goat_count,
        t.total_headcount(),
        t.slaughter_total,
        t.meat_output_tons
    );

    let totals = Paragraph::new(text).block(
        Block::default()
            .title(format!(" Totals ({} records) ", t.records))
            .borders(Borders::ALL),
    );

    frame.render_widget(totals, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let (text, color) = match &app.status {
        Some((StatusKind::Info, text)) => (text.as_str(), Color::DarkGray),
        Some((StatusKind::Warning, text)) => (text.as_str(), Color::Yellow),
        Some((StatusKind::Error, text)) => (text.as_str(), Color::Red),
        None => ("a:add | e:edit | d:delete | /:search | ?:help | q:quit", Color::DarkGray),
    };

    frame.render_widget(Paragraph::new(text).style(Style::default().fg(color)), area);
}

/// Render the entry/edit form as a popup.
fn render_form(frame: &mut Frame<'_>, form: &RecordForm) {
    let title = match form.editing {
        Some(id) => format!(" Edit record #{id} "),
        None => " New record ".to_string(),
    };

    let mut lines: Vec<Line<'_>> = Field::ALL
        .iter()
        .map(|&field| {
            let focused = field == form.focused();
            let value = if field.is_choice() && form.unlisted.is_some() {
                format!("< {} > (not listed)", form.value(field))
            } else if field.is_choice() {
                format!("< {} >", form.value(field))
            } else if focused {
                format!("{}_", form.value(field))
            } else {
                form.value(field).to_string()
            };
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{:<18}", field.label()), label_style),
                Span::raw(value),
            ])
        })
        .collect();

    lines.push(Line::default());
    match &form.error {
        Some(error) => lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red))),
        None => lines.push(Line::styled(
            "Tab:next | ←/→:choose | Enter:save | Esc:cancel",
            Style::default().fg(Color::DarkGray),
        )),
    }

    let area = centered(frame.area(), 60, 14);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        area,
    );
}

/// Render the delete confirmation popup.
fn render_confirm(frame: &mut Frame<'_>, id: i64) {
    let area = centered(frame.area(), 40, 3);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(format!("Delete record #{id}? (y/n)")).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        ),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
