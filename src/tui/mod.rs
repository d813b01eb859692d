//! Terminal front end: setup, board view and keyboard seats.

mod input;
mod ui;

pub use input::{KeyboardInput, map_key, read_input, wait_for_dismiss};
pub use ui::{
    MatchView, TuiRenderer, banner, center_rect, draw, draw_animation_frame, draw_popup,
};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use tracing::{error, info, instrument};

/// The terminal every screen draws into.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switches to raw mode on the alternate screen.
#[instrument]
pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    info!("Terminal ready");
    Ok(terminal)
}

/// Undoes [`setup_terminal`].
#[instrument(skip(terminal))]
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    terminal.show_cursor()?;
    info!("Terminal restored");
    Ok(())
}

/// Runs `body` on a fresh terminal and restores it whatever happens.
pub fn with_terminal<T>(body: impl FnOnce(&mut Tui) -> Result<T>) -> Result<T> {
    let mut terminal = setup_terminal()?;
    let res = body(&mut terminal);
    let restored = restore_terminal(&mut terminal);

    if let Err(err) = &res {
        error!(error = ?err, "Terminal session error");
    }
    let value = res?;
    restored?;
    Ok(value)
}
