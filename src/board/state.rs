//! Board state and the flip state machine.
//!
//! All mutation happens here, inside the board's single critical
//! section. Nothing in this module suspends: the async surface in
//! `mod.rs` calls these transitions while holding the lock and only
//! awaits with the lock released.

use std::collections::{BTreeSet, HashMap};
use tokio::sync::oneshot;
use tracing::{debug, info};

use super::cell::{Cell, PlayerId, Position, Symbol};
use super::error::FlipError;
use super::invariants;
use super::parse::ParsedGrid;
use super::turn::Turn;
use super::waiters::WaiterRegistry;
use super::watchers::ChangeListeners;

/// Outcome of a first-card flip attempt.
pub(crate) enum FirstFlip {
    /// The caller took control of the card.
    Taken,
    /// The cell is empty or out of bounds.
    NoCard,
    /// The card is controlled by another player; the caller was queued
    /// and must suspend on the handle until woken, then re-examine.
    Wait(oneshot::Receiver<()>),
}

/// The grid, every player's turn record, the waiter queues and the
/// pending change listeners. Owned exclusively by the board handle; no
/// internal structure crosses the boundary by reference.
#[derive(Debug)]
pub(crate) struct BoardState {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) cells: Vec<Cell>,
    pub(crate) turns: HashMap<PlayerId, Turn>,
    pub(crate) waiters: WaiterRegistry,
    pub(crate) watchers: ChangeListeners,
}

impl BoardState {
    pub(crate) fn new(grid: ParsedGrid) -> Self {
        let rows = *grid.rows();
        let cols = *grid.cols();
        let cells = grid.symbols().iter().cloned().map(Cell::new).collect();
        Self {
            rows,
            cols,
            cells,
            turns: HashMap::new(),
            waiters: WaiterRegistry::default(),
            watchers: ChangeListeners::default(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Addressing
    // ─────────────────────────────────────────────────────────────

    pub(crate) fn index_of(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    pub(crate) fn position_of(&self, index: usize) -> Position {
        Position {
            row: index / self.cols,
            col: index % self.cols,
        }
    }

    pub(crate) fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn checked_position(&self, row: usize, col: usize) -> Option<Position> {
        let pos = Position { row, col };
        self.in_bounds(pos).then_some(pos)
    }

    /// The player's current turn record; players are created lazily.
    pub(crate) fn turn(&self, player: &str) -> Turn {
        self.turns.get(player).copied().unwrap_or_default()
    }

    pub(crate) fn cards_remaining(&self) -> usize {
        self.cells.iter().filter(|cell| cell.value.is_some()).count()
    }

    // ─────────────────────────────────────────────────────────────
    //  Turn settling (runs at the start of the player's next flip)
    // ─────────────────────────────────────────────────────────────

    /// Completes the player's previous turn, if both of its cards are
    /// recorded: a matched pair is removed (waking every waiter on
    /// either cell), an unmatched pair is turned back face-down where
    /// no one else claimed the cards in the meantime.
    ///
    /// Returns whether any cell changed.
    pub(crate) fn settle_turn(&mut self, player: &str) -> bool {
        let Turn::Finished {
            first,
            second,
            matched,
        } = self.turn(player)
        else {
            return false;
        };

        let mut changed = false;
        match (matched, second) {
            (true, Some(second)) => {
                let first_index = self.index_of(first);
                let second_index = self.index_of(second);
                let still_matching = self.cells[first_index].value.is_some()
                    && self.cells[first_index].value == self.cells[second_index].value;
                if still_matching {
                    self.cells[first_index].clear();
                    self.cells[second_index].clear();
                    // The cards are gone; every queued flip resumes and
                    // observes the empty cells.
                    self.waiters.wake_all(first_index);
                    self.waiters.wake_all(second_index);
                    info!(player, %first, %second, "removed matched pair");
                    changed = true;
                } else {
                    // The pair diverged since it was matched. Drop any
                    // control the player still holds, then stand the
                    // cards down.
                    for pos in [first, second] {
                        let index = self.index_of(pos);
                        if self.cells[index].controller.as_deref() == Some(player) {
                            self.cells[index].controller = None;
                            self.waiters.wake_one(index);
                            changed = true;
                        }
                        changed |= self.face_down_if_unclaimed(pos);
                    }
                }
            }
            // A matched turn always records its second position.
            (true, None) => {}
            (false, _) => {
                for pos in [Some(first), second].into_iter().flatten() {
                    changed |= self.face_down_if_unclaimed(pos);
                }
            }
        }

        self.turns.insert(player.to_string(), Turn::Idle);
        changed
    }

    /// Turns the card face-down if it is still on the board, face-up
    /// and unclaimed. A card someone else controls is left alone.
    fn face_down_if_unclaimed(&mut self, pos: Position) -> bool {
        let index = self.index_of(pos);
        let cell = &mut self.cells[index];
        if cell.value.is_some() && cell.face_up && cell.controller.is_none() {
            cell.face_up = false;
            true
        } else {
            false
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  First-card flip
    // ─────────────────────────────────────────────────────────────

    pub(crate) fn flip_first(&mut self, player: &str, row: usize, col: usize) -> FirstFlip {
        let Some(pos) = self.checked_position(row, col) else {
            debug!(player, row, col, "first flip out of bounds");
            return FirstFlip::NoCard;
        };
        let index = self.index_of(pos);

        let contended = match (&self.cells[index].value, &self.cells[index].controller) {
            (None, _) => {
                debug!(player, %pos, "first flip found no card");
                return FirstFlip::NoCard;
            }
            (Some(_), Some(owner)) => owner != player,
            (Some(_), None) => false,
        };
        if contended {
            debug!(player, %pos, "first flip contended; queueing");
            return FirstFlip::Wait(self.waiters.enqueue(index));
        }

        let cell = &mut self.cells[index];
        cell.face_up = true;
        cell.controller = Some(player.to_string());
        self.turns
            .insert(player.to_string(), Turn::OneCard { first: pos });
        info!(player, %pos, "took control of first card");
        FirstFlip::Taken
    }

    // ─────────────────────────────────────────────────────────────
    //  Second-card flip (never suspends)
    // ─────────────────────────────────────────────────────────────

    /// Flips the player's second card. Every path through here mutates
    /// the board, completes the turn record, and returns without ever
    /// suspending; failing fast on a controlled target is what keeps a
    /// flip from blocking while it holds a card.
    pub(crate) fn flip_second(
        &mut self,
        player: &str,
        first: Position,
        row: usize,
        col: usize,
    ) -> Result<(), FlipError> {
        let Some(pos) = self.checked_position(row, col) else {
            debug!(player, row, col, "second flip out of bounds");
            self.release(first, player);
            self.close_turn(player, first, None, false);
            return Err(FlipError::NoCardHere { row, col });
        };
        let index = self.index_of(pos);

        if self.cells[index].value.is_none() {
            debug!(player, %pos, "second flip found no card");
            self.release(first, player);
            self.close_turn(player, first, Some(pos), false);
            return Err(FlipError::NoCardHere { row, col });
        }

        if self.cells[index].controller.is_some() {
            // Includes the caller's own first card.
            debug!(player, %pos, "second flip target is controlled; failing fast");
            self.release(first, player);
            self.close_turn(player, first, Some(pos), false);
            return Err(FlipError::CardControlled { row, col });
        }

        self.cells[index].face_up = true;
        let matched = self.cells[self.index_of(first)].value == self.cells[index].value;
        if matched {
            // The first card is already under the player's control.
            self.cells[index].controller = Some(player.to_string());
            info!(player, %first, second = %pos, "matched a pair");
        } else {
            self.release(first, player);
            self.release(pos, player);
            debug!(player, %first, second = %pos, "no match");
        }
        self.close_turn(player, first, Some(pos), matched);
        Ok(())
    }

    fn close_turn(&mut self, player: &str, first: Position, second: Option<Position>, matched: bool) {
        self.turns.insert(
            player.to_string(),
            Turn::Finished {
                first,
                second,
                matched,
            },
        );
    }

    /// Clears the player's control of the card, if held, and passes the
    /// cell to the head waiter.
    fn release(&mut self, pos: Position, player: &str) {
        let index = self.index_of(pos);
        let cell = &mut self.cells[index];
        if cell.controller.as_deref() == Some(player) {
            cell.controller = None;
        }
        if self.waiters.wake_one(index) {
            debug!(player, %pos, "released card to head waiter");
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Snapshots, notifications, map support
    // ─────────────────────────────────────────────────────────────

    /// Renders the snapshot from `player`'s perspective: the `RxC`
    /// header, then one token line per cell in row-major order.
    pub(crate) fn render(&self, player: &str) -> String {
        let mut out = format!("{}x{}\n", self.rows, self.cols);
        for cell in &self.cells {
            out.push_str(&cell.view_for(player).to_string());
            out.push('\n');
        }
        out
    }

    /// Resolves every pending change listener with a fresh snapshot
    /// rendered from its own perspective, in registration order.
    pub(crate) fn notify_watchers(&mut self) {
        if self.watchers.is_empty() {
            return;
        }
        debug!(listeners = self.watchers.len(), "firing change notifications");
        for (player, tx) in self.watchers.take() {
            let snapshot = self.render(&player);
            let _ = tx.send(snapshot);
        }
    }

    /// The distinct card values currently on the board, in sorted order.
    pub(crate) fn distinct_values(&self) -> Vec<Symbol> {
        let mut values = BTreeSet::new();
        for cell in &self.cells {
            if let Some(value) = &cell.value {
                values.insert(value.clone());
            }
        }
        values.into_iter().collect()
    }

    /// Rewrites every card whose value has an entry in `rewritten`.
    /// Face state and control are untouched; empty cells are skipped.
    ///
    /// Returns the number of cells rewritten.
    pub(crate) fn apply_values(&mut self, rewritten: &HashMap<Symbol, Symbol>) -> usize {
        let mut applied = 0;
        for cell in &mut self.cells {
            if let Some(value) = &cell.value {
                if let Some(next) = rewritten.get(value) {
                    cell.value = Some(next.clone());
                    applied += 1;
                }
            }
        }
        applied
    }

    /// Panics in debug builds if any board invariant is violated.
    pub(crate) fn debug_verify(&self) {
        if cfg!(debug_assertions) {
            if let Err(description) = invariants::verify_all(self) {
                panic!("board invariant violated: {description}");
            }
        }
    }
}
