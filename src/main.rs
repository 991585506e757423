//! Memory Scramble - unified CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use memory_scramble::simulation::{self, SimulationConfig};
use memory_scramble::Board;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Show { board } => run_show(board),
        Command::Simulate {
            board,
            players,
            flips,
            seed,
        } => run_simulate(board, players, flips, seed).await,
    }
}

/// Parse a board file and print the blank-state snapshot.
fn run_show(path: PathBuf) -> Result<()> {
    let board = Board::from_file(&path)
        .with_context(|| format!("loading board from {}", path.display()))?;
    print!("{}", board.look("observer"));
    Ok(())
}

/// Drive concurrent random players against a board and report tallies.
async fn run_simulate(path: PathBuf, players: usize, flips: usize, seed: u64) -> Result<()> {
    let board = Board::from_file(&path)
        .with_context(|| format!("loading board from {}", path.display()))?;
    info!(players, flips, seed, "starting simulation");

    let report = simulation::run(
        board,
        SimulationConfig {
            players,
            flips_per_player: flips,
            seed,
        },
    )
    .await;

    println!(
        "attempted {} flips: {} succeeded, {} rejected, {} abandoned; {} cards left",
        report.flips_attempted,
        report.flips_succeeded,
        report.flips_failed,
        report.flips_abandoned,
        report.cards_remaining
    );
    Ok(())
}
