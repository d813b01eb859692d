//! Command-line interface for tictac.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictac_core::{Mark, StrategyKind};

use crate::lineup::MatchMode;

/// Terminal tic-tac-toe with computer players
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Terminal tic-tac-toe with computer players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run; opens the menu when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Skip the menu and start this mode directly
        #[arg(long, value_enum)]
        mode: Option<MatchMode>,

        /// Mark played from the keyboard in pvm mode
        #[arg(long, default_value = "x")]
        human: Mark,

        /// Strategy for a machine playing X
        #[arg(long = "x")]
        x: Option<StrategyKind>,

        /// Strategy for a machine playing O
        #[arg(long = "o")]
        o: Option<StrategyKind>,

        /// Seed for starters and computer players
        #[arg(long)]
        seed: Option<u64>,

        /// Disable all cosmetic delays
        #[arg(long)]
        instant: bool,
    },

    /// Play computer-only matches without a terminal UI and print a summary
    Simulate {
        /// Strategy playing X
        #[arg(long = "x", default_value = "heuristic")]
        x: StrategyKind,

        /// Strategy playing O
        #[arg(long = "o", default_value = "random")]
        o: StrategyKind,

        /// Number of matches
        #[arg(short, long, default_value = "1000")]
        games: u32,

        /// Master seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
