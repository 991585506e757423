//! Tests for the random concurrent-player simulation driver.

use memory_scramble::simulation::{self, SimulationConfig};
use memory_scramble::Board;
use std::time::Duration;

const PERFECT: &str = include_str!("../boards/perfect.txt");

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_simulation_makes_progress() {
    let board = Board::parse(PERFECT).expect("board parses");
    let config = SimulationConfig {
        players: 4,
        flips_per_player: 50,
        seed: 7,
    };

    // The driver must terminate: no interleaving of flips can deadlock
    // the board, and contended waits are bounded by the driver timeout.
    let report = tokio::time::timeout(Duration::from_secs(60), simulation::run(board.clone(), config))
        .await
        .expect("the simulation terminates");

    assert_eq!(report.flips_attempted, 200);
    assert_eq!(
        report.flips_attempted,
        report.flips_succeeded + report.flips_failed + report.flips_abandoned
    );
    assert_eq!(report.cards_remaining, board.cards_remaining());
    assert!(report.cards_remaining <= 9);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_simulation_single_player() {
    let board = Board::parse("2x2\nA\nA\nB\nB\n").expect("board parses");
    let config = SimulationConfig {
        players: 1,
        flips_per_player: 40,
        seed: 3,
    };

    let report = simulation::run(board, config).await;
    assert_eq!(report.flips_attempted, 40);
    // A lone player never contends, so nothing can be abandoned.
    assert_eq!(report.flips_abandoned, 0);
}
