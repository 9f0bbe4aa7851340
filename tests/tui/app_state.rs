//! Key-sequence tests: crossterm key events translated under the current
//! input mode and applied to the app, the way the binary's event loop does.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use user_dashboard::tui::app::{demo_users, App, InputMode};
use user_dashboard::tui::events::{apply_event, translate_key, InputEvent};
use user_dashboard::{Dashboard, DashboardConfig, ModalState, Role, UserId};

fn app(seed: bool) -> App {
    let mut config = DashboardConfig::default();
    if seed {
        config.seed = demo_users();
    }
    App::new(Dashboard::new(&config))
}

/// Feeds one key through translation and application, then ticks.
fn press(app: &mut App, code: KeyCode) {
    let event = translate_key(app.input_mode(), KeyEvent::new(code, KeyModifiers::NONE));
    apply_event(app, event);
    app.tick();
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn test_add_user_by_keyboard() {
    let mut app = app(false);
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.input_mode(), InputMode::Modal);

    type_text(&mut app, "Ann");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "a@x.com");
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.input_mode(), InputMode::Table);
    let snapshot = app.dashboard().store().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "Ann");
    assert_eq!(snapshot[0].role, Role::Admin);
}

#[test]
fn test_typing_q_in_form_does_not_quit() {
    let mut app = app(false);
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Quinn");
    assert!(!app.should_quit);
    assert_eq!(app.dashboard().modal().map(|f| f.name().to_string()), Some("Quinn".into()));
}

#[test]
fn test_escape_cancels_form_then_quits() {
    let mut app = app(false);
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Ann");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.dashboard().modal_state(), ModalState::Closed);
    assert!(app.dashboard().store().is_empty());
    assert!(!app.should_quit);

    press(&mut app, KeyCode::Esc);
    assert!(app.should_quit);
}

#[test]
fn test_edit_selected_row_by_keyboard() {
    let mut app = app(true);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.dashboard().modal_state(), ModalState::Editing(UserId(2)));

    // Clear the name and retype it.
    for _ in 0..app.dashboard().modal().map_or(0, |f| f.name().chars().count()) {
        press(&mut app, KeyCode::Backspace);
    }
    type_text(&mut app, "Bo B.");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.dashboard().modal_state(), ModalState::Closed);
    let user = app.dashboard().store().get(UserId(2)).cloned().expect("test: user 2");
    assert_eq!(user.name, "Bo B.");
    assert_eq!(user.role, Role::Editor);
}

#[test]
fn test_invalid_submit_keeps_modal_and_store_untouched() {
    let mut app = app(true);
    let before = app.dashboard().store().snapshot();
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode(), InputMode::Modal);
    assert_eq!(app.dashboard().store().snapshot(), before);
}

#[test]
fn test_filter_mode_round_trip() {
    let mut app = app(true);
    press(&mut app, KeyCode::Char('/'));
    assert_eq!(app.input_mode(), InputMode::Filter);
    type_text(&mut app, "admin");
    assert_eq!(app.dashboard().table().filtered_len(), 2);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode(), InputMode::Table);
    assert_eq!(app.dashboard().table().filter(), "admin");
}

#[test]
fn test_paging_and_page_size_keys() {
    let mut app = app(true);
    assert_eq!(app.dashboard().table().page_count(), 2);
    press(&mut app, KeyCode::PageDown);
    assert_eq!(app.dashboard().table().range_label(), "6 \u{2013} 8 of 8");
    press(&mut app, KeyCode::Char('+'));
    assert_eq!(app.dashboard().table().page_size(), 10);
    assert_eq!(app.dashboard().table().page_index(), 0);
    press(&mut app, KeyCode::Char('-'));
    assert_eq!(app.dashboard().table().page_size(), 5);
}

#[test]
fn test_help_overlay_swallows_next_key() {
    let mut app = app(false);
    press(&mut app, KeyCode::Char('h'));
    assert_eq!(app.input_mode(), InputMode::Help);
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit);
    assert_eq!(app.input_mode(), InputMode::Table);
}

#[test]
fn test_resize_switches_open_form_layout() {
    let mut app = app(false);
    apply_event(&mut app, InputEvent::Resize(120, 40));
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.dashboard().modal().map(|f| f.cols()), Some(2));

    apply_event(&mut app, InputEvent::Resize(70, 40));
    assert_eq!(app.dashboard().modal().map(|f| f.cols()), Some(1));
}

#[test]
fn test_ctrl_c_quits_from_modal() {
    let mut app = app(false);
    press(&mut app, KeyCode::Char('a'));
    let event = translate_key(
        app.input_mode(),
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    );
    apply_event(&mut app, event);
    assert!(app.should_quit);
}
