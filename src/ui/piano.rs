//! Piano keyboard display.
//!
//! Renders the fixed two-octave key range as a strip of chromatic key
//! columns, black keys styled dark and white keys light, with the same
//! root/scale highlighting as the fretboard. The bottom row carries the
//! note name labels.

use crate::app::{App, FocusedPanel, KEY_CELL_WIDTH};
use crate::board::KeyPosition;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Renders the piano panel.
pub fn render_piano(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let block = Block::default()
        .title(" Keyboard (C3-B4) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::Gray }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let cursor = (app.focused_panel == FocusedPanel::Keyboard).then_some(app.key_cursor);

    // Key bodies on every row, labels on the last one
    for row in 0..inner.height {
        let with_labels = row == inner.height - 1;
        let line = key_row(app.key_grid(), cursor, with_labels);
        frame.render_widget(
            Paragraph::new(line),
            Rect::new(inner.x, inner.y + row, inner.width, 1),
        );
    }
}

/// Builds one row of key cells across the whole keyboard range.
fn key_row(keys: &[KeyPosition], cursor: Option<usize>, with_labels: bool) -> Line<'static> {
    let spans = keys
        .iter()
        .map(|key| {
            let content = if with_labels {
                format!("{:^width$}", key.pitch.class.name(), width = KEY_CELL_WIDTH as usize)
            } else {
                " ".repeat(KEY_CELL_WIDTH as usize)
            };
            Span::styled(content, key_style(key, cursor == Some(key.index)))
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

/// Styling for a key: base black/white shape, overridden by scale
/// membership and root marking, with the cursor reversed on top.
fn key_style(key: &KeyPosition, at_cursor: bool) -> Style {
    let mut style = if key.is_root {
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    } else if key.in_scale {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if key.is_black {
        Style::default().fg(Color::White).bg(Color::Black)
    } else {
        Style::default().fg(Color::Black).bg(Color::White)
    };

    // Keep the key shape readable on highlighted black keys
    if key.is_black && (key.in_scale || key.is_root) {
        style = style.add_modifier(Modifier::DIM);
    }

    if at_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }

    style
}
