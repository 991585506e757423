//! Memory Scramble - a concurrency-safe shared game board.
//!
//! Multiple independent players issue interleaved card flips against a
//! single grid of face-down cards. The board enforces per-card
//! ownership, fair FIFO waiting on contended cards, per-player two-card
//! turn state, match detection with atomic removal, and consistent
//! per-player snapshots for observers. A secondary operation rewrites
//! every card value through a user-supplied asynchronous function while
//! the game continues.
//!
//! # Architecture
//!
//! - **Board**: clone-able handle over one mutex-guarded state; the
//!   flip state machine, snapshots, one-shot change listeners and the
//!   global value rewrite all live behind it
//! - **Invariants**: first-class invariant modules re-checked after
//!   every public mutation in debug builds
//! - **Simulation**: a seeded driver that pits concurrent machine
//!   players against one board
//!
//! # Example
//!
//! ```no_run
//! use memory_scramble::Board;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let board = Board::parse("2x2\n🦄\n🌈\n🦄\n🌈")?;
//! board.flip("alice", 0, 0).await?;
//! board.flip("alice", 1, 0).await?; // matches the first card
//! println!("{}", board.look("alice"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
pub mod simulation;

pub use board::invariants::Invariant;
pub use board::{Board, CellView, FlipError, ParseError, ParsedGrid, PlayerId, Position, Symbol};
