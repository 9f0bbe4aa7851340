//! # Widget: Filter Bar
//!
//! Single-line filter input. Shows a cursor while focused and a hint when
//! empty, plus the match count once a filter is active.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::app::{App, Focus};

/// Renders the filter bar.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Filter && app.dashboard().modal().is_none();
    let table = app.dashboard().table();

    let mut block = Block::default()
        .title(" FILTER ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::DarkGray }));
    if !table.filter().trim().is_empty() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} match ", table.filtered_len()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let line = if table.filter().is_empty() && !focused {
        Line::from(Span::styled(
            "press / to filter by name, email or role",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::styled(
            table.filter().to_string(),
            Style::default().fg(Color::White),
        )];
        if focused {
            spans.push(Span::styled("\u{258f}", Style::default().fg(Color::Cyan)));
        }
        Line::from(spans)
    };

    f.render_widget(Paragraph::new(line).block(block), area);
}
