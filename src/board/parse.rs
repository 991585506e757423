//! Board-description parsing.
//!
//! A board file is a header line `RxC` followed by R·C non-empty lines,
//! one card symbol per cell in row-major order. Symbols are opaque
//! tokens; no pairing requirement is enforced.

use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::instrument;

use super::cell::Symbol;

/// A malformed board description.
#[derive(Debug, Display, Error)]
pub enum ParseError {
    /// The first line does not have the `RxC` shape.
    #[display("malformed board header {:?}: expected ROWSxCOLS", header)]
    BadHeader {
        /// The offending header line.
        header: String,
    },
    /// The header parsed but a dimension is zero.
    #[display("board dimensions must be positive, got {}x{}", rows, cols)]
    BadDimensions {
        /// Parsed row count.
        rows: usize,
        /// Parsed column count.
        cols: usize,
    },
    /// The body does not supply exactly R·C cell lines.
    #[display("expected {} cell lines, found {}", expected, found)]
    WrongCellCount {
        /// R·C from the header.
        expected: usize,
        /// Number of body lines present.
        found: usize,
    },
    /// A cell line is empty or whitespace-only.
    #[display("empty cell symbol on line {}", line)]
    EmptyCell {
        /// 1-based line number in the input.
        line: usize,
    },
    /// The board file could not be read.
    #[display("failed to read board file: {}", source)]
    Io {
        /// The underlying I/O failure.
        source: std::io::Error,
    },
}

/// A parsed board description, ready to seed a live board.
#[derive(Debug, Clone, Getters)]
pub struct ParsedGrid {
    /// Row count, at least 1.
    rows: usize,
    /// Column count, at least 1.
    cols: usize,
    /// Cell symbols in row-major order, exactly `rows * cols` of them.
    symbols: Vec<Symbol>,
}

impl std::str::FromStr for ParsedGrid {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_grid(text)
    }
}

/// Parses a textual board description.
#[instrument(skip(text))]
pub(crate) fn parse_grid(text: &str) -> Result<ParsedGrid, ParseError> {
    let mut lines: Vec<&str> = text.lines().collect();
    // Trailing blank lines are tolerated; blanks among the cells are not.
    while matches!(lines.last(), Some(line) if line.trim().is_empty()) {
        lines.pop();
    }

    let header = lines.first().copied().unwrap_or_default();
    let (rows, cols) = parse_header(header)?;

    let body = &lines[1..];
    let expected = rows * cols;
    if body.len() != expected {
        return Err(ParseError::WrongCellCount {
            expected,
            found: body.len(),
        });
    }

    let mut symbols = Vec::with_capacity(expected);
    for (offset, line) in body.iter().enumerate() {
        let symbol = line.trim();
        if symbol.is_empty() {
            return Err(ParseError::EmptyCell { line: offset + 2 });
        }
        symbols.push(symbol.to_string());
    }

    Ok(ParsedGrid {
        rows,
        cols,
        symbols,
    })
}

fn parse_header(header: &str) -> Result<(usize, usize), ParseError> {
    let bad = || ParseError::BadHeader {
        header: header.to_string(),
    };
    let (left, right) = header.trim().split_once('x').ok_or_else(bad)?;
    let rows: usize = left.parse().map_err(|_| bad())?;
    let cols: usize = right.parse().map_err(|_| bad())?;
    if rows == 0 || cols == 0 {
        return Err(ParseError::BadDimensions { rows, cols });
    }
    Ok((rows, cols))
}
