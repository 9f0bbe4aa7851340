//! Full-frame render tests against ratatui's `TestBackend`.
//!
//! Each test draws the whole dashboard and checks for text that only the
//! expected widgets produce.

use ratatui::backend::TestBackend;
use ratatui::Terminal;
use user_dashboard::chart::ChartModule;
use user_dashboard::features::{FeatureRegistry, CHART_FEATURE};
use user_dashboard::form::FormModule;
use user_dashboard::tui::app::{demo_users, App, MIN_COLS, MIN_ROWS};
use user_dashboard::tui::events::{apply_event, InputEvent};
use user_dashboard::tui::ui;
use user_dashboard::{Dashboard, DashboardConfig, DashboardError, Role, UserFields};

fn render(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test: terminal");
    terminal.draw(|f| ui::draw(f, app)).expect("test: draw");
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn seeded(users: Vec<UserFields>) -> App {
    let mut config = DashboardConfig::default();
    config.seed = users;
    App::new(Dashboard::new(&config))
}

#[test]
fn test_render_empty_dashboard() {
    let app = seeded(Vec::new());
    let screen = render(&app, 120, 40);
    assert!(screen.contains("USERS"));
    assert!(screen.contains("No users yet. Press [a] to add one."));
    assert!(screen.contains("ROLES"));
    assert!(screen.contains("0 of 0"));
}

#[test]
fn test_render_table_and_legend() {
    let app = seeded(vec![
        UserFields::new("Ann", "a@x.com", Role::Admin),
        UserFields::new("Bo", "b@x.com", Role::Editor),
    ]);
    let screen = render(&app, 120, 40);
    assert!(screen.contains("Ann"));
    assert!(screen.contains("b@x.com"));
    assert!(screen.contains("Admin: 1 (50.0%)"));
    assert!(screen.contains("Editor: 1 (50.0%)"));
    assert!(screen.contains("Viewer: 0 (0.0%)"));
    assert!(screen.contains("1 \u{2013} 2 of 2"));
}

#[test]
fn test_render_only_current_page() {
    let app = seeded(demo_users());
    let screen = render(&app, 120, 40);
    assert!(screen.contains("Ann Archer"));
    assert!(!screen.contains("Fay Fontaine"));
    assert!(screen.contains("page 1/2"));
}

#[test]
fn test_render_filter_no_match_message() {
    let mut app = seeded(demo_users());
    apply_event(&mut app, InputEvent::FocusFilter);
    for c in "zzz".chars() {
        apply_event(&mut app, InputEvent::FilterInput(c));
    }
    let screen = render(&app, 120, 40);
    assert!(screen.contains("No users match the filter."));
    assert!(screen.contains("zzz"));
}

#[test]
fn test_render_modal_with_inline_errors() {
    let mut app = seeded(Vec::new());
    apply_event(&mut app, InputEvent::AddUser);
    let screen = render(&app, 120, 40);
    assert!(screen.contains("Add user"));
    assert!(!screen.contains("Name is required"));

    apply_event(&mut app, InputEvent::FormEnter);
    let screen = render(&app, 120, 40);
    assert!(screen.contains("Name is required"));
    assert!(screen.contains("Role is required"));
}

#[test]
fn test_render_edit_modal_prepopulated() {
    let mut app = seeded(vec![UserFields::new("Ann", "a@x.com", Role::Admin)]);
    apply_event(&mut app, InputEvent::EditSelected);
    let screen = render(&app, 120, 40);
    assert!(screen.contains("Edit user"));
    assert!(screen.contains("\u{25c0} Admin \u{25b6}"));
}

#[test]
fn test_render_single_column_modal_on_narrow_terminal() {
    let mut app = seeded(Vec::new());
    apply_event(&mut app, InputEvent::Resize(70, 30));
    apply_event(&mut app, InputEvent::AddUser);
    assert_eq!(app.dashboard().modal().map(|f| f.cols()), Some(1));
    let screen = render(&app, 70, 30);
    assert!(screen.contains("Add user"));
    assert!(screen.contains("Cancel"));
}

#[test]
fn test_render_help_overlay() {
    let mut app = seeded(Vec::new());
    apply_event(&mut app, InputEvent::Help);
    let screen = render(&app, 120, 40);
    assert!(screen.contains("Press any key to close"));
}

#[test]
fn test_render_too_small_guard() {
    let app = seeded(Vec::new());
    let screen = render(&app, MIN_COLS - 1, MIN_ROWS);
    assert!(screen.contains("Terminal too small"));
    assert!(!screen.contains("USERS"));
}

#[test]
fn test_render_at_exact_minimum_size() {
    let app = seeded(demo_users());
    let screen = render(&app, MIN_COLS, MIN_ROWS);
    assert!(!screen.contains("Terminal too small"));
    assert!(screen.contains("USERS"));
}

#[test]
fn test_render_chart_failure_surfaces_in_activity() {
    let registry = FeatureRegistry::with_loaders(
        || {
            Err(DashboardError::FeatureLoad {
                feature: CHART_FEATURE,
                reason: "palette offline".into(),
            })
        },
        || FormModule::new(80),
    );
    let mut config = DashboardConfig::default();
    config.seed = vec![UserFields::new("Ann", "a@x.com", Role::Admin)];
    let app = App::new(Dashboard::with_features(&config, registry));

    let screen = render(&app, 120, 40);
    assert!(screen.contains("Chart unavailable"));
    assert!(screen.contains("palette offline"));
    assert!(screen.contains("Ann"));
}

#[test]
fn test_render_with_custom_palette_does_not_panic() {
    let registry = FeatureRegistry::with_loaders(
        || ChartModule::from_hex(&["#000000".to_string(), "#ffffff".to_string(), "#808080".to_string()]),
        || FormModule::new(80),
    );
    let mut config = DashboardConfig::default();
    config.seed = demo_users();
    let app = App::new(Dashboard::with_features(&config, registry));
    for (w, h) in [(60, 20), (100, 30), (200, 60)] {
        let screen = render(&app, w, h);
        assert!(screen.contains("ROLES"));
    }
}

#[test]
fn test_render_title_clock_fits_inside_border() {
    let app = seeded(Vec::new());
    let screen = render(&app, 120, 40);
    let top: Vec<char> = screen.chars().take(120).collect();
    assert_eq!(top[119], '\u{2510}');
    assert_eq!(top[118], ' ');
    // Seconds digit of the right-aligned clock.
    assert!(top[117].is_ascii_digit(), "title row: {}", top.iter().collect::<String>());
    assert!(screen.contains(" user-dashboard "));
}
