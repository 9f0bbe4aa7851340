//! # Module: TUI App State
//!
//! ## Responsibility
//! Wraps the [`Dashboard`] view-model with the state that only the terminal
//! front end cares about: quit flag, help overlay, and whether keystrokes go
//! to the table or to the filter bar.
//!
//! ## Guarantees
//! - The input mode is derived from state, never stored twice
//! - `tick()` never panics

use crate::controller::Dashboard;
use crate::model::{Role, UserFields};

/// Minimum terminal width for the dashboard to render.
pub const MIN_COLS: u16 = 60;

/// Minimum terminal height for the dashboard to render.
pub const MIN_ROWS: u16 = 20;

/// Where table-mode keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Navigation keys drive the table.
    Table,
    /// Typing edits the filter text.
    Filter,
}

/// Which key map applies right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Help overlay visible: any key closes it.
    Help,
    /// The user form is open.
    Modal,
    /// The filter bar has focus.
    Filter,
    /// Table navigation.
    Table,
}

/// Primary application state for the TUI.
#[derive(Debug)]
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Table or filter focus.
    pub focus: Focus,
    dashboard: Dashboard,
}

impl App {
    /// Creates the app around a dashboard.
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            focus: Focus::Table,
            dashboard,
        }
    }

    /// The key map for the current state. Help wins over the modal, the
    /// modal wins over the filter bar.
    pub fn input_mode(&self) -> InputMode {
        if self.show_help {
            InputMode::Help
        } else if self.dashboard.modal().is_some() {
            InputMode::Modal
        } else if self.focus == Focus::Filter {
            InputMode::Filter
        } else {
            InputMode::Table
        }
    }

    /// Processes pending store snapshots.
    ///
    /// # Returns
    /// `true` if anything changed.
    pub fn tick(&mut self) -> bool {
        self.dashboard.sync()
    }

    /// The dashboard view-model.
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// The dashboard view-model, mutably.
    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }
}

/// Sample users for `--demo` runs.
pub fn demo_users() -> Vec<UserFields> {
    vec![
        UserFields::new("Ann Archer", "ann@example.com", Role::Admin),
        UserFields::new("Bo Brandt", "bo@example.com", Role::Editor),
        UserFields::new("Cy Castillo", "cy@example.com", Role::Viewer),
        UserFields::new("Dee Dalton", "dee@example.com", Role::Editor),
        UserFields::new("Eli Eriksen", "eli@example.org", Role::Viewer),
        UserFields::new("Fay Fontaine", "fay@example.org", Role::Viewer),
        UserFields::new("Gus Grant", "gus@example.net", Role::Admin),
        UserFields::new("Hana Holm", "hana@example.net", Role::Editor),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    fn app() -> App {
        App::new(Dashboard::new(&DashboardConfig::default()))
    }

    #[test]
    fn test_new_app_starts_in_table_mode() {
        let app = app();
        assert!(!app.should_quit);
        assert!(!app.show_help);
        assert_eq!(app.input_mode(), InputMode::Table);
    }

    #[test]
    fn test_input_mode_priority() {
        let mut app = app();
        app.focus = Focus::Filter;
        assert_eq!(app.input_mode(), InputMode::Filter);
        app.dashboard_mut().open_create();
        assert_eq!(app.input_mode(), InputMode::Modal);
        app.show_help = true;
        assert_eq!(app.input_mode(), InputMode::Help);
    }

    #[test]
    fn test_demo_users_are_valid() {
        for user in demo_users() {
            assert!(crate::form::validate(&user.name, &user.email, Some(user.role)).is_ok());
        }
    }

    #[test]
    fn test_tick_reports_no_change_when_idle() {
        let mut app = app();
        assert!(!app.tick());
    }
}
