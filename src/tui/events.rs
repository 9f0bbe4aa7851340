//! # Module: TUI Event Handling
//!
//! ## Responsibility
//! Polls crossterm events and translates keyboard input into dashboard
//! actions. The same key means different things in table, filter, modal and
//! help mode, so translation takes the current [`InputMode`].
//!
//! ## Guarantees
//! - Non-blocking event polling with configurable timeout
//! - No panics on any key combination
//! - Ctrl+C always triggers quit, in every mode

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Focus, InputMode};
use crate::form::FormField;

/// A dashboard action produced by a terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Quit (q, Esc in table mode, or Ctrl+C anywhere).
    Quit,
    /// Toggle the help overlay.
    Help,
    /// Move keystrokes to the filter bar.
    FocusFilter,
    /// Open the form for a new user.
    AddUser,
    /// Open the form for the selected row.
    EditSelected,
    /// Select the row above.
    SelectUp,
    /// Select the row below.
    SelectDown,
    /// Previous page.
    PrevPage,
    /// Next page.
    NextPage,
    /// First page.
    FirstPage,
    /// Last page.
    LastPage,
    /// Next larger page size.
    GrowPageSize,
    /// Next smaller page size.
    ShrinkPageSize,
    /// Append a character to the filter.
    FilterInput(char),
    /// Delete the last filter character.
    FilterBackspace,
    /// Return focus to the table.
    FilterDone,
    /// Focus the next form element.
    FormNext,
    /// Focus the previous form element.
    FormPrev,
    /// Type into the focused form field.
    FormInput(char),
    /// Delete from the focused form field.
    FormBackspace,
    /// Select the previous role.
    RolePrev,
    /// Select the next role.
    RoleNext,
    /// Submit the form, or activate the focused button.
    FormEnter,
    /// Close the form without saving.
    FormCancel,
    /// A terminal resize occurred.
    Resize(u16, u16),
    /// No actionable event within the poll window.
    None,
}

/// Polls for a single input event with the given timeout.
///
/// # Arguments
/// * `mode` - Key map to translate with.
/// * `timeout` - Maximum time to wait for an event.
///
/// # Returns
/// The detected `InputEvent`, or `InputEvent::None` if no event occurred or
/// polling failed.
pub fn poll_event(mode: InputMode, timeout: Duration) -> InputEvent {
    let available = match event::poll(timeout) {
        Ok(v) => v,
        Err(_) => return InputEvent::None,
    };
    if !available {
        return InputEvent::None;
    }

    match event::read() {
        Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => translate_key(mode, key),
        Ok(Event::Resize(w, h)) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

/// Applies an input event to the app state.
///
/// # Arguments
/// * `app` - Mutable reference to app state.
/// * `event` - The input event to apply.
pub fn apply_event(app: &mut App, event: InputEvent) {
    match event {
        InputEvent::Quit => app.should_quit = true,
        InputEvent::Help => app.show_help = !app.show_help,
        InputEvent::FocusFilter => app.focus = Focus::Filter,
        InputEvent::FilterDone => app.focus = Focus::Table,
        InputEvent::AddUser => {
            app.dashboard_mut().open_create();
        }
        InputEvent::EditSelected => {
            app.dashboard_mut().open_selected();
        }
        InputEvent::SelectUp => app.dashboard_mut().table_mut().select_prev(),
        InputEvent::SelectDown => app.dashboard_mut().table_mut().select_next(),
        InputEvent::PrevPage => app.dashboard_mut().table_mut().prev_page(),
        InputEvent::NextPage => app.dashboard_mut().table_mut().next_page(),
        InputEvent::FirstPage => app.dashboard_mut().table_mut().first_page(),
        InputEvent::LastPage => app.dashboard_mut().table_mut().last_page(),
        InputEvent::GrowPageSize => app.dashboard_mut().table_mut().grow_page_size(),
        InputEvent::ShrinkPageSize => app.dashboard_mut().table_mut().shrink_page_size(),
        InputEvent::FilterInput(c) => app.dashboard_mut().table_mut().push_filter_char(c),
        InputEvent::FilterBackspace => app.dashboard_mut().table_mut().pop_filter_char(),
        InputEvent::FormNext => with_form(app, |f| f.focus_next()),
        InputEvent::FormPrev => with_form(app, |f| f.focus_prev()),
        InputEvent::FormInput(c) => with_form(app, |f| f.input_char(c)),
        InputEvent::FormBackspace => with_form(app, |f| f.backspace()),
        InputEvent::RolePrev => with_form(app, |f| f.prev_role()),
        InputEvent::RoleNext => with_form(app, |f| f.next_role()),
        InputEvent::FormEnter => {
            let focus = app.dashboard().modal().map(|f| f.focus());
            match focus {
                Some(FormField::Cancel) => {
                    app.dashboard_mut().cancel_form();
                }
                Some(_) => {
                    app.dashboard_mut().submit_form();
                }
                None => {}
            }
        }
        InputEvent::FormCancel => {
            app.dashboard_mut().cancel_form();
        }
        InputEvent::Resize(w, _) => app.dashboard_mut().set_viewport_width(w),
        InputEvent::None => {}
    }
}

fn with_form(app: &mut App, f: impl FnOnce(&mut crate::form::UserForm)) {
    if let Some(form) = app.dashboard_mut().modal_mut() {
        f(form);
    }
}

/// Translates a crossterm key event to an `InputEvent` under `mode`.
pub fn translate_key(mode: InputMode, key: KeyEvent) -> InputEvent {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputEvent::Quit;
    }

    match mode {
        InputMode::Help => InputEvent::Help,
        InputMode::Modal => translate_modal_key(key),
        InputMode::Filter => match key.code {
            KeyCode::Enter | KeyCode::Esc => InputEvent::FilterDone,
            KeyCode::Backspace => InputEvent::FilterBackspace,
            KeyCode::Char(c) => InputEvent::FilterInput(c),
            _ => InputEvent::None,
        },
        InputMode::Table => translate_table_key(key),
    }
}

fn translate_modal_key(key: KeyEvent) -> InputEvent {
    match key.code {
        KeyCode::Esc => InputEvent::FormCancel,
        KeyCode::Enter => InputEvent::FormEnter,
        KeyCode::Tab | KeyCode::Down => InputEvent::FormNext,
        KeyCode::BackTab | KeyCode::Up => InputEvent::FormPrev,
        KeyCode::Left => InputEvent::RolePrev,
        KeyCode::Right => InputEvent::RoleNext,
        KeyCode::Backspace => InputEvent::FormBackspace,
        KeyCode::Char(c) => InputEvent::FormInput(c),
        _ => InputEvent::None,
    }
}

fn translate_table_key(key: KeyEvent) -> InputEvent {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputEvent::Quit,
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => InputEvent::Help,
        KeyCode::Char('/') => InputEvent::FocusFilter,
        KeyCode::Char('a') | KeyCode::Char('A') => InputEvent::AddUser,
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => InputEvent::EditSelected,
        KeyCode::Up => InputEvent::SelectUp,
        KeyCode::Down => InputEvent::SelectDown,
        KeyCode::Left | KeyCode::PageUp => InputEvent::PrevPage,
        KeyCode::Right | KeyCode::PageDown => InputEvent::NextPage,
        KeyCode::Home => InputEvent::FirstPage,
        KeyCode::End => InputEvent::LastPage,
        KeyCode::Char('+') | KeyCode::Char('=') => InputEvent::GrowPageSize,
        KeyCode::Char('-') => InputEvent::ShrinkPageSize,
        _ => InputEvent::None,
    }
}
