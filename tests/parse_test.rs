//! Tests for board parsing and file loading.

use memory_scramble::{Board, ParseError};
use std::io::Write;

const PERFECT: &str = include_str!("../boards/perfect.txt");

#[test]
fn test_parse_perfect_board() {
    let board = Board::parse(PERFECT).expect("board parses");
    assert_eq!(board.rows(), 3);
    assert_eq!(board.cols(), 3);
    assert_eq!(board.cards_remaining(), 9);
}

#[test]
fn test_fresh_board_is_all_face_down() {
    let board = Board::parse(PERFECT).expect("board parses");
    let snapshot = board.look("alice");
    let lines: Vec<&str> = snapshot.lines().collect();
    assert_eq!(lines[0], "3x3");
    assert_eq!(lines.len(), 10);
    assert!(lines[1..].iter().all(|line| *line == "down"));
}

#[test]
fn test_malformed_header_rejected() {
    for text in ["3by3\n🦄", "x3\n🦄", "3x\n🦄", "three x three\n🦄", ""] {
        let result = Board::parse(text);
        assert!(
            matches!(result, Err(ParseError::BadHeader { .. })),
            "header of {:?} should be rejected",
            text
        );
    }
}

#[test]
fn test_zero_dimensions_rejected() {
    assert!(matches!(
        Board::parse("0x5\n"),
        Err(ParseError::BadDimensions { rows: 0, cols: 5 })
    ));
}

#[test]
fn test_wrong_cell_count_rejected() {
    let result = Board::parse("2x2\n🦄\n🦄\n🌈\n");
    assert!(matches!(
        result,
        Err(ParseError::WrongCellCount {
            expected: 4,
            found: 3
        })
    ));
}

#[test]
fn test_blank_cell_line_rejected() {
    let result = Board::parse("2x2\n🦄\n\n🌈\n🌈\n");
    assert!(matches!(result, Err(ParseError::EmptyCell { line: 3 })));
}

#[test]
fn test_no_pairing_requirement() {
    // Three of a kind and a singleton are fine; matching is just value
    // equality of two distinct cells.
    let board = Board::parse("2x2\n🦄\n🦄\n🦄\n🌈\n").expect("board parses");
    assert_eq!(board.cards_remaining(), 4);
}

#[test]
fn test_from_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(PERFECT.as_bytes()).expect("write board");

    let board = Board::from_file(file.path()).expect("board loads");
    assert_eq!(board.rows(), 3);
    assert_eq!(board.cols(), 3);
}

#[test]
fn test_from_file_missing_path() {
    let result = Board::from_file("/nonexistent/board.txt");
    assert!(matches!(result, Err(ParseError::Io { .. })));
}
