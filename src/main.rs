mod app;
mod clock;
mod config;
mod error;
mod task;
mod todo_list;
mod ui;

use app::App;
use clap::Parser;
use clock::SystemClock;
use config::{Args, Config};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::TodoError;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::File, io, sync::Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Logs go to a file because the terminal belongs to the UI.
fn init_logging(config: &Config) -> Result<(), TodoError> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = Config::from_args(&args)?;
    init_logging(&config)?;

    let mut app = App::new(&config, Box::new(SystemClock))?;
    info!(date_format = %config.date_format, "starting todoers");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = ui::run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let counts = app.list.counts();
    info!(
        remaining = counts.remaining,
        total = counts.total,
        "session ended"
    );

    if let Err(err) = result {
        eprintln!("{:?}", err);
    }
    Ok(())
}
