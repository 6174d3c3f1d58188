//! Header bar with the current selections and the scale note list.

use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Renders the header: selections on the first line, the ordered scale
/// notes (degree order, root marked) on the second.
pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" frettui ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label_style = Style::default().fg(Color::DarkGray);
    let value_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let mut selections = vec![
        Span::styled("Root: ", label_style),
        Span::styled(app.root().name(), value_style),
        Span::styled("   Scale: ", label_style),
        Span::styled(app.scale_def().name.clone(), value_style),
        Span::styled("   Tuning: ", label_style),
        Span::styled(app.tuning().name.clone(), value_style),
        Span::styled("   Frets: ", label_style),
        Span::styled(app.max_fret.to_string(), value_style),
    ];
    if app.muted {
        selections.push(Span::styled(
            "   [muted]",
            Style::default().fg(Color::Yellow),
        ));
    }
    if app.audio.is_none() {
        selections.push(Span::styled(
            "   [no audio]",
            Style::default().fg(Color::Red),
        ));
    }

    let mut notes = vec![Span::styled("Notes: ", label_style)];
    for (i, pc) in app.scale().notes().iter().enumerate() {
        if i > 0 {
            notes.push(Span::raw(" "));
        }
        let style = if app.scale().is_root(*pc) {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        notes.push(Span::styled(pc.name(), style));
    }

    frame.render_widget(
        Paragraph::new(vec![Line::from(selections), Line::from(notes)]),
        inner,
    );
}
