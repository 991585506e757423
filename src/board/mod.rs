//! The shared Memory Scramble board.
//!
//! A [`Board`] is a clone-able handle over one mutex-guarded state.
//! Every public operation takes the lock for a short synchronous
//! critical section; the only places a caller suspends are a contended
//! first-card flip (queued behind the card's controller) and the
//! in-flight transforms of [`Board::map`]. Wakeups and change
//! notifications are delivered through one-shot channels sent inside
//! the mutating call's critical section, so they are ordered before the
//! mutating call returns.

mod cell;
mod error;
pub mod invariants;
mod parse;
mod state;
mod turn;
mod waiters;
mod watchers;

pub use cell::{CellView, PlayerId, Position, Symbol};
pub use error::FlipError;
pub use parse::{ParseError, ParsedGrid};

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tracing::{debug, info, instrument};

use state::{BoardState, FirstFlip};
use turn::Turn;

/// What a flip decided while holding the lock.
enum Step {
    Done(Result<(), FlipError>),
    Wait(oneshot::Receiver<()>),
}

/// A concurrency-safe shared game board.
///
/// Cloning the handle shares the same board. The board exclusively owns
/// its cells, turn records, waiter queues and listeners; callers only
/// ever receive rendered snapshots.
#[derive(Debug, Clone)]
pub struct Board {
    state: Arc<Mutex<BoardState>>,
}

impl Board {
    /// Creates a board from a parsed grid, all cards face-down.
    #[instrument(skip(grid))]
    pub fn new(grid: ParsedGrid) -> Self {
        let state = BoardState::new(grid);
        state.debug_verify();
        info!(rows = state.rows, cols = state.cols, "created board");
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Parses a textual board description and creates the board.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Ok(Self::new(parse::parse_grid(text)?))
    }

    /// Reads and parses a board file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading board file");
        let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io { source })?;
        Self::parse(&text)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.lock().rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.lock().cols
    }

    /// Number of cards still on the board.
    pub fn cards_remaining(&self) -> usize {
        self.lock().cards_remaining()
    }

    /// Renders the board from `player`'s perspective at a single atomic
    /// point: the `RxC` header, then one of `none`, `down`,
    /// `my <symbol>` or `up <symbol>` per cell in row-major order.
    ///
    /// A pure read; it never suspends and never changes state.
    #[instrument(skip(self))]
    pub fn look(&self, player: &str) -> String {
        self.lock().render(player)
    }

    /// Flips a card for `player`.
    ///
    /// The call first settles the player's previous turn if it is
    /// complete (removing a matched pair, or turning an unmatched pair
    /// back face-down), then flips either the player's first or second
    /// card of the new turn:
    ///
    /// - a first flip of a card controlled by another player suspends,
    ///   queued FIFO behind the card, until the controller releases or
    ///   removes it;
    /// - a second flip never suspends: a controlled target fails with
    ///   [`FlipError::CardControlled`] after relinquishing the first
    ///   card, which is what makes the board deadlock-free.
    ///
    /// Failures do not poison the board; the side effects dictated by
    /// the flip rules take effect before the error is returned.
    #[instrument(skip(self))]
    pub async fn flip(&self, player: &str, row: usize, col: usize) -> Result<(), FlipError> {
        loop {
            let step = {
                let mut state = self.lock();
                let mut changed = state.settle_turn(player);
                debug_assert!(!state.turn(player).is_finished());
                let step = match state.turn(player) {
                    Turn::OneCard { first } => {
                        let result = state.flip_second(player, first, row, col);
                        changed = true;
                        Step::Done(result)
                    }
                    _ => match state.flip_first(player, row, col) {
                        FirstFlip::Taken => {
                            changed = true;
                            Step::Done(Ok(()))
                        }
                        FirstFlip::NoCard => Step::Done(Err(FlipError::NoCardHere { row, col })),
                        FirstFlip::Wait(rx) => Step::Wait(rx),
                    },
                };
                if changed {
                    state.notify_watchers();
                }
                state.debug_verify();
                step
            };

            match step {
                Step::Done(result) => return result,
                Step::Wait(rx) => {
                    debug!(player, row, col, "suspended on contended card");
                    // A dropped sender is treated like a wake; the
                    // re-examination decides what actually happened.
                    let _ = rx.await;
                    debug!(player, row, col, "resumed; re-examining card");
                }
            }
        }
    }

    /// Waits for the next board mutation, then resolves with a fresh
    /// snapshot from `player`'s perspective.
    ///
    /// Registration itself is not a mutation and never resolves other
    /// listeners. Mutations are: any flip that altered cell state
    /// (successful or failed) and any completed [`Board::map`].
    #[instrument(skip(self))]
    pub async fn watch(&self, player: &str) -> String {
        let rx = self.lock().watchers.register(player);
        match rx.await {
            Ok(snapshot) => snapshot,
            // The board was torn down with the listener pending; fall
            // back to a direct read.
            Err(_) => self.look(player),
        }
    }

    /// Rewrites every card value through an asynchronous transform.
    ///
    /// The transform is invoked exactly once per distinct value on the
    /// board, in sorted order, so cells sharing a value always receive
    /// the same output and matching pairs remain matching pairs. While
    /// transforms are in flight the board stays live for flips and
    /// reads; the outputs are written back in one atomic step, leaving
    /// face state and control untouched. A transform failure aborts the
    /// whole rewrite before anything is written.
    #[instrument(skip(self, transform))]
    pub async fn map<F, Fut, E>(&self, transform: F) -> Result<(), E>
    where
        F: Fn(Symbol) -> Fut,
        Fut: Future<Output = Result<Symbol, E>>,
    {
        let distinct = self.lock().distinct_values();
        let mut rewritten = HashMap::with_capacity(distinct.len());
        for value in distinct {
            let next = transform(value.clone()).await?;
            rewritten.insert(value, next);
        }

        let mut state = self.lock();
        let applied = state.apply_values(&rewritten);
        info!(values = rewritten.len(), cells = applied, "applied card transform");
        state.notify_watchers();
        state.debug_verify();
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BoardState> {
        self.state.lock().unwrap()
    }
}
