use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use holdem_rs::tui::{app::AppState, controller};
use ratatui::prelude::*;
use std::fs::File;
use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;

const LOG_FILE: &str = "holdem.log";

/// File-only logging; the terminal belongs to the TUI.
fn init_logging() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    match File::create(LOG_FILE) {
        Ok(file) => {
            // a second init only fails if a logger is already installed
            let _ = simplelog::WriteLogger::init(log::LevelFilter::Debug, config, file);
        }
        Err(err) => eprintln!("holdem-rs: logging disabled, cannot create {LOG_FILE}: {err}"),
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "holdem-rs TUI requires a real terminal (TTY).\nRun in Terminal and press q to quit. Version: {}",
            holdem_rs::VERSION
        );
        return Ok(());
    }
    init_logging();
    log::info!("holdem-rs {} starting", holdem_rs::VERSION);

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(250);
    let mut app = AppState::default();

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    log::info!("holdem-rs exiting after {} hands", app.table.hand_number());
    res
}
