//! TUI module
//!
//! Terminal user interface for helmdeck, built with ratatui. The UI loop is
//! the only place controllers are touched: it draws, applies finished remote
//! calls through `App::poll`, then feeds at most one input event.

pub mod app;
pub mod editor;
mod theme;
pub mod views;

pub use app::*;
pub use theme::*;

use crate::backend::SharedBackend;
use crate::config::Config;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

/// How long to wait for input before polling controllers again
const TICK: Duration = Duration::from_millis(100);

/// Run the TUI application until the user quits
pub async fn run_tui(backend: SharedBackend, config: Config) -> Result<()> {
    tracing::debug!("Initializing TUI");

    let enable_mouse = config.ui.enable_mouse;
    let mut app = App::new(backend, config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if enable_mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    tracing::debug!("TUI initialized, entering main loop");
    let result = event_loop(&mut terminal, &mut app);

    tracing::debug!("TUI shutting down");

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if enable_mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        // only a background task that died without answering fails here
        if let Err(e) = app.poll() {
            tracing::error!("Background task failed: {:#}", e);
            return Err(e);
        }

        if !event::poll(TICK)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key)? {
                    break;
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => app.handle_scroll(1),
                MouseEventKind::ScrollUp => app.handle_scroll(-1),
                _ => {}
            },
            _ => {}
        }
    }
    Ok(())
}
