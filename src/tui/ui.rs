//! # Module: TUI Rendering
//!
//! ## Responsibility
//! Orchestrates the overall dashboard layout by dividing the terminal into regions
//! and delegating to individual widget renderers. Handles the minimum size guard,
//! the user form modal and the help overlay.
//!
//! ## Guarantees
//! - Minimum size guard displays a centered message if terminal is too small
//! - Overlays are drawn last and clear what is underneath
//! - No panics during rendering regardless of terminal dimensions

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::app::{App, InputMode, MIN_COLS, MIN_ROWS};
use super::widgets;

/// Renders the complete dashboard UI into the given frame.
///
/// # Arguments
/// * `f` - The Ratatui frame to render into.
/// * `app` - The application state to display.
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    // Minimum size guard
    if size.width < MIN_COLS || size.height < MIN_ROWS {
        draw_too_small(f, size);
        return;
    }

    let clock = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let title = title_text(size.width.saturating_sub(2), &clock);
    let outer_block = Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            footer_text(app.input_mode()),
            Style::default().fg(Color::DarkGray),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer_block.inner(size);
    f.render_widget(outer_block, size);

    // Filter bar, main section, activity tail
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(7),
        ])
        .split(inner);

    // Table on the left, chart on the right
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    widgets::filter::render(f, main_chunks[0], app);
    widgets::table::render(f, middle[0], app);
    widgets::chart::render(f, middle[1], app);
    widgets::activity::render(f, main_chunks[2], app);

    if let Some(form) = app.dashboard().modal() {
        let area = popup_area(
            size,
            widgets::form::POPUP_WIDTH,
            widgets::form::popup_height(form.cols()),
        );
        widgets::form::render(f, area, form);
    }

    if app.show_help {
        draw_help_overlay(f, size);
    }
}

const TITLE_LABEL: &str = " user-dashboard ";

/// Title bar text: the label on the left, `clock` right-aligned, fitting
/// within `inner_width` columns.
pub fn title_text(inner_width: u16, clock: &str) -> String {
    let used = TITLE_LABEL.chars().count() + clock.chars().count() + 1;
    let gap = (inner_width as usize).saturating_sub(used);
    format!("{TITLE_LABEL}{}{clock} ", " ".repeat(gap))
}

/// Key hints for the footer, by input mode.
pub fn footer_text(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Table => " [a]dd  [e]dit  [/] filter  [\u{2190}\u{2192}] page  [+-] rows  [h]elp  [q]uit ",
        InputMode::Filter => " type to filter  [Enter/Esc] back to table ",
        InputMode::Modal => " [Tab] next field  [Enter] save  [Esc] cancel ",
        InputMode::Help => " press any key to close help ",
    }
}

/// A `width` x `height` rectangle centred in `area`, shrunk to leave a
/// two-cell margin when `area` is too small.
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Renders the "terminal too small" warning.
fn draw_too_small(f: &mut Frame, area: Rect) {
    let msg = format!("Terminal too small: resize to at least {MIN_COLS}x{MIN_ROWS}");
    let current_size = format!("Current size: {}x{}", area.width, area.height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let para = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            msg,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            current_size,
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(para, area);
}

/// Renders the help overlay.
fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let help_area = popup_area(area, 52, 20);
    f.render_widget(Clear, help_area);

    let key = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)));
    let heading = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::White)));

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  user-dashboard",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("  Table:"),
        key("    [a] Add user          [e/Enter] Edit selected"),
        key("    [\u{2191}\u{2193}] Select row        [\u{2190}\u{2192}/PgUp/PgDn] Page"),
        key("    [Home/End] First/last page"),
        key("    [+/-] Rows per page   [/] Filter"),
        key("    [q/Esc] Quit          [Ctrl+C] Force quit"),
        heading("  Filter:"),
        key("    type to filter, [Backspace] delete"),
        key("    [Enter/Esc] Back to table"),
        heading("  Form:"),
        key("    [Tab/Shift+Tab] Move focus"),
        key("    [\u{2190}\u{2192}] Change role    [Enter] Save"),
        key("    [Esc] Cancel"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press any key to close",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(Paragraph::new(help_text).block(block), help_area);
}
