//! # Binary: user-dashboard
//!
//! ## Responsibility
//! Entry point for the terminal user dashboard. Loads configuration,
//! initialises file logging, sets up the terminal, runs the event loop, and
//! ensures clean exit.
//!
//! ## Usage
//! ```bash
//! user-dashboard                               # empty store, defaults
//! user-dashboard --demo                        # a few sample users
//! user-dashboard --config dashboard.toml --log-file dashboard.log
//! user-dashboard --print-schema > dashboard.schema.json
//! ```
//!
//! ## Guarantees
//! - Terminal state always restored on exit, even on panic
//! - Clean shutdown on q, Esc, or Ctrl+C
//! - Configuration errors are reported before the terminal is taken over

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use user_dashboard::config::{self, DashboardConfig};
use user_dashboard::tui::app::{demo_users, App};
use user_dashboard::tui::events::{apply_event, poll_event};
use user_dashboard::tui::ui;
use user_dashboard::{init_tracing, Dashboard, DashboardError};

/// Render and input poll interval.
const TICK_RATE: Duration = Duration::from_millis(100);

/// Reactive in-memory user dashboard.
#[derive(Debug, Parser)]
#[command(name = "user-dashboard", version, about)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (overrides `logging.file`).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the configuration JSON Schema and exit.
    #[arg(long)]
    print_schema: bool,

    /// Seed sample users when the configuration has none.
    #[arg(long)]
    demo: bool,
}

/// Loads the configuration and applies command-line overrides.
fn load_config(args: &Args) -> Result<DashboardConfig, DashboardError> {
    let mut config = match &args.config {
        Some(path) => config::loader::load_from_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(path) = &args.log_file {
        config.logging.file = Some(path.clone());
    }
    if args.demo && config.seed.is_empty() {
        config.seed = demo_users();
    }
    Ok(config)
}

/// Sets up the terminal for TUI rendering.
///
/// # Errors
/// Returns `io::Error` if terminal initialization fails.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restores the terminal to its original state.
fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.print_schema {
        println!("{}", config::export_schema()?);
        return Ok(());
    }

    let config = load_config(&args)?;
    init_tracing(&config.logging)?;
    info!(
        config = ?args.config,
        seed_users = config.seed.len(),
        "starting user-dashboard"
    );

    // Install panic hook that restores terminal before printing panic message
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(Dashboard::new(&config));

    let result = run(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("user-dashboard error: {e}");
        std::process::exit(1);
    }

    info!(users = app.dashboard().store().len(), "user-dashboard exited");
    Ok(())
}

/// Runs the event loop until the user quits.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let size = terminal.size()?;
    app.dashboard_mut().set_viewport_width(size.width);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let event = poll_event(app.input_mode(), TICK_RATE);
        apply_event(app, event);

        if app.should_quit {
            break;
        }

        app.tick();
    }

    Ok(())
}
