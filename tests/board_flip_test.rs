//! Tests for the flip rules: turn lifecycle, matching, failure modes.
//!
//! The perfect board lays out, row-major:
//! 🦄 🦄 🌈 / 🌈 🍭 🍭 / ⭐ ⭐ 🎲

use memory_scramble::{Board, FlipError};

const PERFECT: &str = include_str!("../boards/perfect.txt");

fn cell_line(board: &Board, player: &str, row: usize, col: usize) -> String {
    let snapshot = board.look(player);
    let lines: Vec<&str> = snapshot.lines().collect();
    lines[1 + row * board.cols() + col].to_string()
}

#[tokio::test]
async fn test_basic_match_remove() {
    let board = Board::parse(PERFECT).expect("board parses");

    board.flip("alice", 0, 0).await.expect("first flip");
    board.flip("alice", 0, 1).await.expect("matching second flip");
    assert_eq!(cell_line(&board, "alice", 0, 0), "my 🦄");
    assert_eq!(cell_line(&board, "alice", 0, 1), "my 🦄");

    // The next flip settles the matched turn and removes the pair.
    board.flip("alice", 1, 1).await.expect("next turn starts");
    assert_eq!(cell_line(&board, "alice", 0, 0), "none");
    assert_eq!(cell_line(&board, "alice", 0, 1), "none");
    assert_eq!(cell_line(&board, "alice", 1, 1), "my 🍭");
    assert_eq!(board.cards_remaining(), 7);
}

#[tokio::test]
async fn test_no_match_flips_back_down() {
    let board = Board::parse(PERFECT).expect("board parses");

    board.flip("alice", 0, 0).await.expect("first flip");
    board.flip("alice", 0, 2).await.expect("non-matching second flip");

    // Both cards stay face-up, uncontrolled, until the turn settles.
    assert_eq!(cell_line(&board, "alice", 0, 0), "up 🦄");
    assert_eq!(cell_line(&board, "alice", 0, 2), "up 🌈");
    assert_eq!(cell_line(&board, "bob", 0, 0), "up 🦄");

    board.flip("alice", 1, 1).await.expect("next turn starts");
    assert_eq!(cell_line(&board, "alice", 0, 0), "down");
    assert_eq!(cell_line(&board, "alice", 0, 2), "down");
    assert_eq!(board.cards_remaining(), 9);
}

#[tokio::test]
async fn test_second_flip_on_own_card_fails() {
    let board = Board::parse(PERFECT).expect("board parses");

    board.flip("alice", 0, 0).await.expect("first flip");
    let err = board
        .flip("alice", 0, 0)
        .await
        .expect_err("second flip on own card is rejected");
    assert!(matches!(err, FlipError::CardControlled { row: 0, col: 0 }));
    assert!(err.to_string().contains("controlled by"));

    // The card stays face-up but alice no longer controls it.
    assert_eq!(cell_line(&board, "alice", 0, 0), "up 🦄");
}

#[tokio::test]
async fn test_first_flip_out_of_bounds() {
    let board = Board::parse(PERFECT).expect("board parses");

    let err = board
        .flip("alice", 9, 9)
        .await
        .expect_err("off-grid flip is rejected");
    assert!(matches!(err, FlipError::NoCardHere { row: 9, col: 9 }));
    assert!(err.to_string().contains("No card at position"));

    // No state change: the whole board is still face-down.
    let snapshot = board.look("alice");
    assert!(snapshot.lines().skip(1).all(|line| line == "down"));
}

#[tokio::test]
async fn test_first_flip_on_removed_cell() {
    let board = Board::parse(PERFECT).expect("board parses");

    board.flip("alice", 0, 0).await.expect("first flip");
    board.flip("alice", 0, 1).await.expect("matching second flip");
    board.flip("alice", 2, 2).await.expect("settling flip");

    let err = board
        .flip("bob", 0, 0)
        .await
        .expect_err("flip on removed card is rejected");
    assert!(matches!(err, FlipError::NoCardHere { row: 0, col: 0 }));
}

#[tokio::test]
async fn test_second_flip_out_of_bounds_relinquishes_first() {
    let board = Board::parse(PERFECT).expect("board parses");

    board.flip("alice", 0, 0).await.expect("first flip");
    let err = board
        .flip("alice", 9, 9)
        .await
        .expect_err("off-grid second flip is rejected");
    assert!(matches!(err, FlipError::NoCardHere { row: 9, col: 9 }));

    // The first card was relinquished but stays face-up until the turn
    // settles on the next flip.
    assert_eq!(cell_line(&board, "alice", 0, 0), "up 🦄");
    board.flip("alice", 1, 1).await.expect("next turn starts");
    assert_eq!(cell_line(&board, "alice", 0, 0), "down");
}

#[tokio::test]
async fn test_second_flip_on_empty_cell_relinquishes_first() {
    let board = Board::parse(PERFECT).expect("board parses");

    // Remove the unicorn pair.
    board.flip("alice", 0, 0).await.expect("first flip");
    board.flip("alice", 0, 1).await.expect("matching second flip");
    board.flip("alice", 2, 2).await.expect("settling flip");

    board.flip("bob", 1, 0).await.expect("bob's first flip");
    let err = board
        .flip("bob", 0, 0)
        .await
        .expect_err("empty second target is rejected");
    assert!(matches!(err, FlipError::NoCardHere { row: 0, col: 0 }));
    assert_eq!(cell_line(&board, "bob", 1, 0), "up 🌈");

    // Bob's next flip settles the failed turn: the rainbow goes back
    // face-down, the empty cell is skipped.
    board.flip("bob", 2, 0).await.expect("bob's next turn");
    assert_eq!(cell_line(&board, "bob", 1, 0), "down");
    assert_eq!(cell_line(&board, "bob", 0, 0), "none");
}

#[tokio::test]
async fn test_match_by_value_not_by_pairing() {
    // Three unicorns: any two distinct cells with equal values match.
    let board = Board::parse("2x2\n🦄\n🦄\n🦄\n🌈\n").expect("board parses");

    board.flip("alice", 0, 0).await.expect("first flip");
    board.flip("alice", 1, 0).await.expect("matching second flip");
    board.flip("alice", 1, 1).await.expect("settling flip");

    assert_eq!(board.cards_remaining(), 2);
    let snapshot = board.look("alice");
    let lines: Vec<&str> = snapshot.lines().collect();
    assert_eq!(lines[1], "none");
    assert_eq!(lines[2], "down");
    assert_eq!(lines[3], "none");
    assert_eq!(lines[4], "my 🌈");
}

#[tokio::test]
async fn test_turns_are_independent_per_player() {
    let board = Board::parse(PERFECT).expect("board parses");

    board.flip("alice", 0, 0).await.expect("alice first flip");
    board.flip("bob", 1, 1).await.expect("bob first flip");
    board.flip("alice", 0, 1).await.expect("alice matches");
    board.flip("bob", 1, 2).await.expect("bob matches");

    assert_eq!(cell_line(&board, "alice", 0, 0), "my 🦄");
    assert_eq!(cell_line(&board, "bob", 0, 0), "up 🦄");
    assert_eq!(cell_line(&board, "bob", 1, 1), "my 🍭");
    assert_eq!(cell_line(&board, "alice", 1, 1), "up 🍭");
}
