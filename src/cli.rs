//! Command-line interface for the memory-scramble binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Memory Scramble - shared board for a concurrent matching game
#[derive(Parser, Debug)]
#[command(name = "memory-scramble")]
#[command(about = "Shared board for a concurrent memory-matching game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a board file and print its blank-state snapshot
    Show {
        /// Path to the board file
        board: PathBuf,
    },

    /// Drive concurrent random players against a board
    Simulate {
        /// Path to the board file
        board: PathBuf,

        /// Number of concurrent players
        #[arg(long, default_value = "4")]
        players: usize,

        /// Flips each player attempts
        #[arg(long, default_value = "64")]
        flips: usize,

        /// Seed for the random streams
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}
