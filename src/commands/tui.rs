//! TUI command implementation

use crate::app::App;
use crate::tui::{handle_key_event, ui};
use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use themeswitch::{logging, Config};
use tracing::{info, warn};

/// Run the TUI application
pub fn run_tui(verbose: bool) -> Result<()> {
    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {e:#}; using default configuration");
            Config::default()
        }
    };

    // The terminal is ours from here on, so logs go to a file
    if let Err(e) = logging::init_tui_logger(&config.log_file, verbose) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
    info!("Starting ThemeSwitch");

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Initialize app
    let mut app = App::new(config);

    let result = run_loop(&mut terminal, &mut app);

    app.shutdown();

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)?;

    if let Err(ref e) = result {
        warn!("TUI exited with error: {e:#}");
    } else {
        info!("ThemeSwitch closed");
    }
    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.tick(Instant::now());

        // Draw
        terminal.draw(|f| ui(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll events (16ms ≈ 60fps)
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key_event(app, key);
                }
            }
        }
    }
}
