//! Fretboard display.
//!
//! Renders one row per string (highest string on top), a fret-number
//! ruler above and the inlay dot markers below. Scale members show their
//! degree number (or note name when toggled), the root is marked in red,
//! and non-members appear dimmed only when "show all notes" is on.

use crate::app::{App, FRET_CELL_WIDTH, OPEN_COLUMN_WIDTH};
use crate::board::FretPosition;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Frets carrying a single inlay dot on a conventional guitar neck.
const INLAY_SINGLE: [u32; 8] = [3, 5, 7, 9, 15, 17, 19, 21];

/// Frets carrying a double inlay dot (octave positions).
const INLAY_DOUBLE: [u32; 2] = [12, 24];

/// Renders the fretboard panel.
pub fn render_fretboard(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let block = Block::default()
        .title(format!(" Fretboard ({}) ", app.tuning().name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::Gray }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 {
        return;
    }

    // Fret-number ruler
    frame.render_widget(
        Paragraph::new(fret_ruler(app.max_fret)),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    // One row per string, highest string first
    let strings = app.tuning().string_count();
    for string in 0..strings {
        let y = inner.y + 1 + string as u16;
        if y >= inner.y + inner.height {
            break;
        }
        let cursor = (app.focused_panel == crate::app::FocusedPanel::Fretboard)
            .then_some(app.fret_cursor);
        let row = string_row(app, string, cursor);
        frame.render_widget(Paragraph::new(row), Rect::new(inner.x, y, inner.width, 1));
    }

    // Inlay dots under the strings
    let dots_y = inner.y + 1 + strings as u16;
    if dots_y < inner.y + inner.height {
        frame.render_widget(
            Paragraph::new(inlay_row(app.max_fret)),
            Rect::new(inner.x, dots_y, inner.width, 1),
        );
    }
}

/// Builds the fret-number ruler, aligned with the fret cells.
fn fret_ruler(max_fret: u32) -> Line<'static> {
    let mut spans = vec![Span::raw(" ".repeat(OPEN_COLUMN_WIDTH as usize))];
    for fret in 1..=max_fret {
        spans.push(Span::styled(
            format!("{:^width$}", fret, width = FRET_CELL_WIDTH as usize),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Builds the inlay dot row below the strings.
fn inlay_row(max_fret: u32) -> Line<'static> {
    let mut spans = vec![Span::raw(" ".repeat(OPEN_COLUMN_WIDTH as usize))];
    for fret in 1..=max_fret {
        let sym = if INLAY_DOUBLE.contains(&fret) {
            "··"
        } else if INLAY_SINGLE.contains(&fret) {
            "·"
        } else {
            ""
        };
        spans.push(Span::styled(
            format!("{:^width$}", sym, width = FRET_CELL_WIDTH as usize),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Builds one string row: the open-note marker, the nut, then one cell
/// per fret.
fn string_row(app: &App, string: usize, cursor: Option<(usize, u32)>) -> Line<'static> {
    let mut spans = Vec::with_capacity(app.max_fret as usize + 2);

    // Open-string marker plus the nut
    if let Some(open) = app.position_at(string, 0) {
        let at_cursor = cursor == Some((string, 0));
        spans.push(marker_span(app, open, at_cursor));
    }
    spans.push(Span::styled(" ║", Style::default().fg(Color::Gray)));

    for fret in 1..=app.max_fret {
        let Some(pos) = app.position_at(string, fret) else {
            break;
        };
        let at_cursor = cursor == Some((string, fret));
        spans.push(marker_span(app, pos, at_cursor));
        spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
    }

    Line::from(spans)
}

/// Builds the 3-column marker cell for a position.
fn marker_span(app: &App, pos: &FretPosition, at_cursor: bool) -> Span<'static> {
    let (content, mut style) = if pos.in_scale {
        let text = if app.show_note_names {
            pos.pitch.class.name().to_string()
        } else {
            // Degree is present whenever in_scale is set
            pos.degree.unwrap_or_default().to_string()
        };
        let style = if pos.is_root {
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        };
        (text, style)
    } else if app.show_all_notes {
        (
            pos.pitch.class.name().to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        ("───".to_string(), Style::default().fg(Color::DarkGray))
    };

    if at_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }

    Span::styled(format!("{content:^3}"), style)
}
