//! Per-cell FIFO queues of suspended flip attempts.
//!
//! Each waiter is a one-shot wake handle enqueued under the contested
//! cell's index. The board wakes exactly the head waiter when a card is
//! released and every waiter when a card is removed. A caller that
//! abandoned its flip leaves a dead handle; the wake discipline discards
//! dead handles in passing so a wake is never absorbed by one.

use std::collections::{HashMap, VecDeque};
use tokio::sync::oneshot;

#[derive(Debug, Default)]
pub(crate) struct WaiterRegistry {
    queues: HashMap<usize, VecDeque<oneshot::Sender<()>>>,
}

impl WaiterRegistry {
    /// Appends a waiter at the tail of the queue for `index` and returns
    /// the handle its flip suspends on.
    pub(crate) fn enqueue(&mut self, index: usize) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        self.queues.entry(index).or_default().push_back(tx);
        rx
    }

    /// Wakes the longest-waiting live flip attempt queued on `index`.
    ///
    /// Returns whether a wake was delivered.
    pub(crate) fn wake_one(&mut self, index: usize) -> bool {
        let Some(queue) = self.queues.get_mut(&index) else {
            return false;
        };
        let mut woken = false;
        while let Some(tx) = queue.pop_front() {
            if tx.send(()).is_ok() {
                woken = true;
                break;
            }
        }
        if queue.is_empty() {
            self.queues.remove(&index);
        }
        woken
    }

    /// Wakes every flip attempt queued on `index`. Used when the card is
    /// removed; resumed flips will observe the empty cell.
    ///
    /// Returns the number of wakes delivered.
    pub(crate) fn wake_all(&mut self, index: usize) -> usize {
        let Some(queue) = self.queues.remove(&index) else {
            return 0;
        };
        let mut woken = 0;
        for tx in queue {
            if tx.send(()).is_ok() {
                woken += 1;
            }
        }
        woken
    }

    /// Iterates over `(cell index, queue length)` for every live queue.
    pub(crate) fn queues(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.queues.iter().map(|(index, queue)| (*index, queue.len()))
    }
}
