//! Help overlay rendering.
//!
//! Displays keyboard shortcuts in a modal overlay.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;

/// Key binding entry for the help display.
struct KeyBinding {
    key: &'static str,
    description: &'static str,
}

const GENERAL_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "?",
        description: "Toggle this help",
    },
    KeyBinding {
        key: "q / Ctrl+C",
        description: "Quit",
    },
    KeyBinding {
        key: "Tab",
        description: "Switch focus between fretboard and keyboard",
    },
    KeyBinding {
        key: "Enter / Space",
        description: "Play the note under the cursor",
    },
    KeyBinding {
        key: "Click",
        description: "Move the cursor to a position and play it",
    },
];

const SELECTION_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "r / R",
        description: "Next / previous root note",
    },
    KeyBinding {
        key: "s / S",
        description: "Next / previous scale",
    },
    KeyBinding {
        key: "t / T",
        description: "Next / previous tuning",
    },
    KeyBinding {
        key: "[ / ]",
        description: "Fewer / more frets (12-24)",
    },
];

const DISPLAY_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "a",
        description: "Toggle showing non-scale notes",
    },
    KeyBinding {
        key: "n",
        description: "Toggle note names vs. scale degrees",
    },
    KeyBinding {
        key: "m",
        description: "Toggle mute",
    },
];

const NAVIGATION_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "h / Left",
        description: "Move cursor left",
    },
    KeyBinding {
        key: "l / Right",
        description: "Move cursor right",
    },
    KeyBinding {
        key: "k / Up",
        description: "Move cursor up a string",
    },
    KeyBinding {
        key: "j / Down",
        description: "Move cursor down a string",
    },
];

/// Renders the help overlay.
pub fn render_help(frame: &mut Frame, scroll: u16) {
    let area = centered_rect(60, 80, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help (?, Esc to close) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (section, bindings) in [
        ("General", GENERAL_BINDINGS),
        ("Selection", SELECTION_BINDINGS),
        ("Display", DISPLAY_BINDINGS),
        ("Navigation", NAVIGATION_BINDINGS),
    ] {
        lines.push(Line::from(Span::styled(
            section,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for binding in bindings {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<16}", binding.key),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(binding.description, Style::default().fg(Color::White)),
            ]));
        }
        lines.push(Line::from(""));
    }

    let visible = lines
        .into_iter()
        .skip(scroll as usize)
        .take(inner.height as usize)
        .collect::<Vec<_>>();

    frame.render_widget(
        Paragraph::new(visible),
        Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), inner.height),
    );
}
