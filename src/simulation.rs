//! Random concurrent-player simulation driver.
//!
//! Drives a handful of machine players against one shared board, each
//! flipping at seeded-random positions, to exercise the contention and
//! wake paths under a real scheduler. The seed makes a run
//! reproducible; per-player streams are derived from it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, instrument};

use crate::Board;

/// How long one flip may stay queued on a contended card before the
/// driver abandons it and moves on. Abandoned flips leave a dead waiter
/// token that the board discards on the next release.
const FLIP_TIMEOUT: Duration = Duration::from_secs(5);

/// Parameters of one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of concurrent players.
    pub players: usize,
    /// Flips each player attempts.
    pub flips_per_player: usize,
    /// Seed for the per-player random streams.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            players: 4,
            flips_per_player: 64,
            seed: 42,
        }
    }
}

/// Aggregate outcome of a simulation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Total flips attempted across all players.
    pub flips_attempted: u64,
    /// Flips that completed successfully.
    pub flips_succeeded: u64,
    /// Flips rejected by the board (no card, controlled card).
    pub flips_failed: u64,
    /// Flips abandoned after waiting out the contention timeout.
    pub flips_abandoned: u64,
    /// Cards left on the board when the run ended.
    pub cards_remaining: usize,
}

impl SimulationReport {
    fn absorb(&mut self, other: &SimulationReport) {
        self.flips_attempted += other.flips_attempted;
        self.flips_succeeded += other.flips_succeeded;
        self.flips_failed += other.flips_failed;
        self.flips_abandoned += other.flips_abandoned;
    }
}

/// Runs the simulation to completion and reports the tallies.
#[instrument(skip(board))]
pub async fn run(board: Board, config: SimulationConfig) -> SimulationReport {
    let rows = board.rows();
    let cols = board.cols();

    let mut handles = Vec::with_capacity(config.players);
    for seat in 0..config.players {
        let board = board.clone();
        let flips = config.flips_per_player;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(seat as u64));
        handles.push(tokio::spawn(async move {
            let player = format!("sim-{seat}");
            let mut tally = SimulationReport::default();
            for _ in 0..flips {
                let row = rng.gen_range(0..rows);
                let col = rng.gen_range(0..cols);
                tally.flips_attempted += 1;
                match timeout(FLIP_TIMEOUT, board.flip(&player, row, col)).await {
                    Ok(Ok(())) => tally.flips_succeeded += 1,
                    Ok(Err(error)) => {
                        tally.flips_failed += 1;
                        debug!(player, row, col, %error, "flip rejected");
                    }
                    Err(_) => {
                        tally.flips_abandoned += 1;
                        debug!(player, row, col, "flip abandoned after timeout");
                    }
                }
            }
            tally
        }));
    }

    let mut report = SimulationReport::default();
    for handle in handles {
        if let Ok(tally) = handle.await {
            report.absorb(&tally);
        }
    }
    report.cards_remaining = board.cards_remaining();

    info!(
        attempted = report.flips_attempted,
        succeeded = report.flips_succeeded,
        failed = report.flips_failed,
        abandoned = report.flips_abandoned,
        remaining = report.cards_remaining,
        "simulation finished"
    );
    report
}
