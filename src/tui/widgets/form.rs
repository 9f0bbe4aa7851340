//! # Widget: User Form Modal
//!
//! ## Responsibility
//! Renders an open [`UserForm`] as a modal: name, email and role inputs with
//! inline errors, and Save / Cancel buttons. Two columns (name beside email)
//! on wide terminals, one column below the handset breakpoint.
//!
//! ## Guarantees
//! - Errors only appear after a submit attempt
//! - The focused element is always visibly marked
//! - Clears whatever is underneath before drawing

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::form::{FormField, UserForm};

/// Modal width in cells, before clamping to the terminal.
pub const POPUP_WIDTH: u16 = 64;

/// Height of one bordered input.
const FIELD_HEIGHT: u16 = 3;

/// Modal height in cells for a column count, borders included.
pub fn popup_height(cols: u8) -> u16 {
    let field_rows = if cols >= 2 { 2 } else { 3 };
    // inputs + buttons + hint + outer border
    field_rows * FIELD_HEIGHT + 1 + 1 + 2
}

/// Role selector text, e.g. `"◀ Admin ▶"`.
pub fn role_text(form: &UserForm) -> String {
    let label = form.role().map_or("choose a role", |r| r.label());
    format!("\u{25c0} {label} \u{25b6}")
}

/// Renders the modal into `area` (the already-centred popup rectangle).
pub fn render(f: &mut Frame, area: Rect, form: &UserForm) {
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (name_area, email_area, role_area, buttons_area, hint_area) = if form.cols() >= 2 {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FIELD_HEIGHT),
                Constraint::Length(FIELD_HEIGHT),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[0]);
        (top[0], top[1], rows[1], rows[2], rows[3])
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FIELD_HEIGHT),
                Constraint::Length(FIELD_HEIGHT),
                Constraint::Length(FIELD_HEIGHT),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);
        (rows[0], rows[1], rows[2], rows[3], rows[4])
    };

    render_input(f, name_area, form, FormField::Name, "Name", form.name());
    render_input(f, email_area, form, FormField::Email, "Email", form.email());
    render_input(f, role_area, form, FormField::Role, "Role", &role_text(form));
    render_buttons(f, buttons_area, form);

    let hint = Paragraph::new(Line::from(Span::styled(
        "Tab next  \u{2190}\u{2192} role  Enter save  Esc cancel",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(hint, hint_area);
}

fn render_input(f: &mut Frame, area: Rect, form: &UserForm, field: FormField, label: &str, value: &str) {
    let focused = form.focus() == field;
    let error = form.field_error(field);
    let border = match (focused, error.is_some()) {
        (_, true) => Color::Red,
        (true, false) => Color::Cyan,
        (false, false) => Color::DarkGray,
    };

    let mut block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    if let Some(error) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }

    let mut spans = vec![Span::styled(value.to_string(), Style::default().fg(Color::White))];
    if focused && field != FormField::Role {
        spans.push(Span::styled("\u{258f}", Style::default().fg(Color::Cyan)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_buttons(f: &mut Frame, area: Rect, form: &UserForm) {
    let button = |label: &str, field: FormField, base: Color| {
        let mut style = Style::default().fg(base);
        if form.focus() == field {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        Span::styled(format!("[ {label} ]"), style)
    };
    let save_color = if form.can_submit() { Color::Green } else { Color::DarkGray };
    let line = Line::from(vec![
        button("Save", FormField::Submit, save_color),
        Span::raw("  "),
        button("Cancel", FormField::Cancel, Color::Gray),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
