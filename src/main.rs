//! tictac - terminal tic-tac-toe
//!
//! Menu-driven play in the terminal, or headless computer-only simulations.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tictac::{Cli, Command, Config, Lineup, MenuController, play_match, with_terminal};
use tictac_core::simulate;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config)?;

    match cli.command {
        None => run_menu(config),
        Some(Command::Play {
            mode,
            human,
            x,
            o,
            seed,
            instant,
        }) => {
            let mut config = config.with_seed(seed);
            if instant {
                config = config.instant();
            }
            match mode {
                Some(mode) => run_single(config, Lineup::from_mode(mode, human, x, o)),
                None => run_menu(config),
            }
        }
        Some(Command::Simulate {
            x,
            o,
            games,
            seed,
            json,
        }) => run_simulation(&config, x, o, games, seed, json),
    }
}

/// Sends tracing output to the configured log file so the TUI stays clean.
fn init_tracing(config: &Config) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file()).with_context(|| {
        format!("Failed to create log file {}", config.log_file().display())
    })?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Run the menu-driven TUI
#[instrument(skip(config))]
fn run_menu(config: Config) -> Result<()> {
    info!("Starting tictac menu");
    let mut controller = MenuController::new(config);
    with_terminal(|terminal| controller.run(terminal))
}

/// Play one match with a fixed lineup, skipping the menu
#[instrument(skip(config))]
fn run_single(config: Config, lineup: Lineup) -> Result<()> {
    info!("Starting single match");
    let mut rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_entropy(),
    };
    let (result, _) = with_terminal(|terminal| play_match(terminal, lineup, &config, &mut rng))?;
    info!(?result, "Single match finished");
    Ok(())
}

/// Run headless matches and print the report
#[instrument(skip(config))]
fn run_simulation(
    config: &Config,
    x: tictac_core::StrategyKind,
    o: tictac_core::StrategyKind,
    games: u32,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let seed = seed.or(*config.seed()).unwrap_or_else(rand::random);
    info!(%x, %o, games, seed, "Starting simulation");

    let report = simulate(x, o, games, seed).context("Simulation failed")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
