//! Terminal user interface components.
//!
//! This module provides the visual components for the scale explorer:
//! the header with the current selections, the fretboard grid, the piano
//! keyboard, the footer hints, and the help overlay.

mod fretboard;
mod header;
mod help;
mod piano;

use crate::app::{App, FocusedPanel, LayoutRegions, FRET_CELL_WIDTH, KEY_CELL_WIDTH, OPEN_COLUMN_WIDTH};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub use fretboard::render_fretboard;
pub use header::render_header;
pub use help::render_help;
pub use piano::render_piano;

/// Height of the piano panel: borders plus five key rows.
const PIANO_PANEL_HEIGHT: u16 = 7;

/// Calculates the layout regions for the given terminal size.
///
/// This is called during rendering to update the regions used for mouse
/// hit testing.
fn calculate_layout(size: Rect, app: &App) -> (LayoutRegions, [Rect; 4]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),                // Header
            Constraint::Min(9),                   // Fretboard
            Constraint::Length(PIANO_PANEL_HEIGHT), // Piano
            Constraint::Length(1),                // Footer
        ])
        .split(size);

    let fretboard = chunks[1];
    let strings = app.tuning().string_count() as u16;

    // Inside the fretboard borders: one ruler row, then the string rows.
    let grid_width =
        (OPEN_COLUMN_WIDTH + app.max_fret as u16 * FRET_CELL_WIDTH).min(fretboard.width.saturating_sub(2));
    let fretboard_grid = Rect {
        x: fretboard.x + 1,
        y: fretboard.y + 2,
        width: grid_width,
        height: strings.min(fretboard.height.saturating_sub(3)),
    };

    let keyboard = chunks[2];
    let key_width = (app.key_grid().len() as u16 * KEY_CELL_WIDTH)
        .min(keyboard.width.saturating_sub(2));
    let keyboard_keys = Rect {
        x: keyboard.x + 1,
        y: keyboard.y + 1,
        width: key_width,
        height: keyboard.height.saturating_sub(2),
    };

    let layout = LayoutRegions {
        header: chunks[0],
        fretboard,
        fretboard_grid,
        keyboard,
        keyboard_keys,
        footer: chunks[3],
    };

    let chunk_arr = [chunks[0], chunks[1], chunks[2], chunks[3]];
    (layout, chunk_arr)
}

/// Renders the complete UI and updates the app's layout regions.
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    let (layout, chunks) = calculate_layout(size, app);
    app.update_layout(layout);

    render_header(frame, chunks[0], app);
    render_fretboard(
        frame,
        chunks[1],
        app,
        app.focused_panel == FocusedPanel::Fretboard,
    );
    render_piano(
        frame,
        chunks[2],
        app,
        app.focused_panel == FocusedPanel::Keyboard,
    );
    render_footer(frame, chunks[3], app);

    if app.show_help {
        render_help(frame, app.help_scroll);
    }
}

/// Renders the footer: key hints on the left, transient status on the right.
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hint_style = Style::default().fg(Color::DarkGray);
    let key_style = Style::default().fg(Color::Yellow);

    let mut spans = vec![
        Span::styled("[r/R]", key_style),
        Span::styled(" Root ", hint_style),
        Span::styled("[s/S]", key_style),
        Span::styled(" Scale ", hint_style),
        Span::styled("[t/T]", key_style),
        Span::styled(" Tuning ", hint_style),
        Span::styled("[a]", key_style),
        Span::styled(" All ", hint_style),
        Span::styled("[n]", key_style),
        Span::styled(" Names ", hint_style),
        Span::styled("[?]", key_style),
        Span::styled(" Help ", hint_style),
        Span::styled("[q]", key_style),
        Span::styled(" Quit", hint_style),
    ];

    if let Some(status) = app.status() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{status} "),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Helper function to center a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
