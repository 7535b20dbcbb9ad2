//! Rewind Tic-Tac-Toe - terminal front end
//!
//! Interactive play with time travel, plus a scripted replay mode.

#![warn(missing_docs)]

mod app;
mod cli;
mod render;
mod script;
mod settings;
mod ui;

use anyhow::Result;
use app::{Action, App};
use clap::Parser;
use cli::{Cli, Command};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use rewind_tictactoe::GameController;
use settings::Settings;
use std::io;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play => run_play(&cli.config),
        Command::Replay { script } => run_replay(&cli.config, &script),
    }
}

/// Run the interactive terminal UI
fn run_play(config: &std::path::Path) -> Result<()> {
    let settings = Settings::load_or_default(config)?;

    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(settings.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(?settings, "Starting Rewind Tic-Tac-Toe");

    enable_raw_mode()?;
    let mut terminal = or_restore(enter_terminal, restore_terminal)?;

    let app = App::new(GameController::with_order(*settings.ascending_order()));
    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = %err, "Event loop failed");
    }
    res
}

/// Switch to the alternate screen and build the ratatui terminal.
fn enter_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Best-effort undo of raw mode and the alternate screen.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        error!(error = %e, "Failed to disable raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
        error!(error = %e, "Failed to leave alternate screen");
    }
}

/// Runs `setup`, calling `restore` before returning its error.
fn or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|e| {
        error!(error = %e, "Terminal setup failed");
        restore();
    })
}

#[instrument(skip_all)]
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key.code) == Action::Quit {
                info!("Quitting");
                return Ok(());
            }
        }
    }
}

/// Apply a command script and print the resulting game
fn run_replay(config: &std::path::Path, script: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let settings = Settings::load_or_default(config)?;
    let commands = script::parse(script)?;

    let mut game = GameController::with_order(*settings.ascending_order());
    script::run(&mut game, &commands)?;

    print!("{}", render::render_text(&game));
    Ok(())
}
