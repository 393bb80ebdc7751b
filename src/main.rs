//! randuser-manager binary entry point.
//!
//! Parses CLI flags, sets up file logging, initializes the terminal in raw
//! mode, runs the TUI event loop, and restores the terminal state on exit.
//!
use anyhow::Context;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use randuser_manager::Result;
use randuser_manager::api::{API_URL, RandomUserClient};
use randuser_manager::app::{self, AppState};
use randuser_manager::format::DisplayMode;

/// Generate, inspect, edit and delete random user records in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Name column shown in the list: first_name or last_name.
    #[arg(long, default_value = "first_name")]
    display: String,

    /// Base URL of the random-user API.
    #[arg(long, env = "RANDUSER_API_URL", default_value = API_URL)]
    api_url: String,

    /// Directory holding theme.conf and keybinds.conf.
    #[arg(long, env = "RANDUSER_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Log file; defaults to randuser-manager.log in the config directory.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Route `tracing` output to a file so it never draws over the TUI.
fn init_logging(path: &std::path::Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_dir = app::config_dir(cli.config_dir.as_deref());
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("create config dir {}", config_dir.display()))?;
    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| config_dir.join("randuser-manager.log"));
    init_logging(&log_path)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let client = RandomUserClient::with_base_url(cli.api_url.clone())
        .context("build HTTP client")?;
    let state = AppState::from_config_dir(&config_dir, DisplayMode::from_select_value(&cli.display));

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, runtime.handle(), client, state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err:#}");
    }
    Ok(())
}
