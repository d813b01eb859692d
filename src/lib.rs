//! Terminal tic-tac-toe front end.
//!
//! # Architecture
//!
//! - **Menu**: screen state machine for mode, mark and strategy selection
//! - **Session**: one match in the terminal, from coin toss to result screen
//! - **TUI**: terminal setup, board rendering and keyboard seats
//! - **Config**: optional TOML settings for pacing, logging and seeding
//!
//! The game rules live in [`tictac_core`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod lineup;
mod menu;
mod session;
mod tui;

// Crate-level exports - Command line
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{Config, ConfigError};

// Crate-level exports - Seats
pub use lineup::{Lineup, MatchMode, Seat};

// Crate-level exports - Menus
pub use menu::{
    MainMenuScreen, MarkSelectScreen, MenuController, PvpConfirmScreen, Screen,
    ScreenTransition, StrategyPrompt, StrategySelectScreen,
};

// Crate-level exports - Matches
pub use session::{AfterMatch, play_match};

// Crate-level exports - Terminal
pub use tui::{
    KeyboardInput, MatchView, Tui, TuiRenderer, banner, center_rect, draw, draw_animation_frame,
    draw_popup, map_key, read_input, restore_terminal, setup_terminal, wait_for_dismiss,
    with_terminal,
};
