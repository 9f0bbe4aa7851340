//! # Widget: User Table
//!
//! ## Responsibility
//! Renders the current page of users with the selected row highlighted, and
//! a paginator line underneath: rows per page, range label, page position.
//!
//! ## Guarantees
//! - Only the visible page is rendered; the table never scrolls on its own
//! - Handles an empty store and an empty filter result with distinct messages

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::table::TableView;
use crate::tui::app::{App, Focus};

/// Paginator text, e.g. `"Rows: 5  6 – 10 of 12  page 2/3"`.
pub fn paginator_text(table: &TableView) -> String {
    format!(
        "Rows: {}  {}  page {}/{}",
        table.page_size(),
        table.range_label(),
        table.page_index() + 1,
        table.page_count(),
    )
}

/// Renders the user table widget.
///
/// # Arguments
/// * `f` - Ratatui frame to render into.
/// * `area` - Rectangular area allocated for this widget.
/// * `app` - Application state containing the table view.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let table = app.dashboard().table();
    let border = if app.focus == Focus::Table && app.dashboard().modal().is_none() {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" USERS ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    if table.visible_rows().is_empty() {
        let msg = if app.dashboard().store().is_empty() {
            "No users yet. Press [a] to add one."
        } else {
            "No users match the filter."
        };
        let para = Paragraph::new(Line::from(Span::styled(
            msg,
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(para, chunks[0]);
    } else {
        let header = Row::new(vec!["ID", "Name", "Email", "Role"]).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row> = table
            .visible_rows()
            .iter()
            .enumerate()
            .map(|(i, user)| {
                let style = if i == table.selected_index() {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Row::new(vec![
                    Cell::from(user.id.to_string()),
                    Cell::from(user.name.clone()),
                    Cell::from(user.email.clone()),
                    Cell::from(user.role.label()),
                ])
                .style(style)
            })
            .collect();
        let widths = [
            Constraint::Length(5),
            Constraint::Percentage(30),
            Constraint::Min(16),
            Constraint::Length(7),
        ];
        f.render_widget(Table::new(rows, widths).header(header), chunks[0]);
    }

    let paginator = Paragraph::new(Line::from(Span::styled(
        paginator_text(table),
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(paginator, chunks[1]);
}
