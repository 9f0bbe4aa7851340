//! # Widget: Activity Log
//!
//! ## Responsibility
//! Renders the tail of the dashboard activity log with color-coded severity.
//! INFO=white, WARN=yellow, ERROR=red.
//!
//! ## Guarantees
//! - Fixed-width timestamp column for alignment
//! - Long lines truncated with `…` rather than wrapping
//! - Handles an empty log gracefully
//! - Newest entries appear at the bottom

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::activity::ActivityLevel;
use crate::tui::app::App;

/// Returns the display color for an activity level.
pub fn level_color(level: ActivityLevel) -> Color {
    match level {
        ActivityLevel::Info => Color::White,
        ActivityLevel::Warn => Color::Yellow,
        ActivityLevel::Error => Color::Red,
    }
}

/// Truncates a string to at most `max_width` characters, adding `…` if
/// truncated.
pub fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_width - 1).collect();
    out.push('\u{2026}');
    out
}

/// Renders the activity log widget.
///
/// # Arguments
/// * `f` - Ratatui frame to render into.
/// * `area` - Rectangular area allocated for this widget.
/// * `app` - Application state containing the activity log.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" ACTIVITY ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible_count = inner.height as usize;
    let max_line_width = inner.width as usize;
    let log = app.dashboard().activity();

    let lines: Vec<Line> = log
        .entries()
        .skip(log.len().saturating_sub(visible_count))
        .map(|entry| {
            let color = level_color(entry.level);
            let prefix_len = entry.timestamp.len() + entry.level.label().len() + 5;
            let body = truncate_with_ellipsis(
                &entry.message,
                max_line_width.saturating_sub(prefix_len),
            );
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", entry.timestamp),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{}  ", entry.level.label()), Style::default().fg(color)),
                Span::styled(body, Style::default().fg(color)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
