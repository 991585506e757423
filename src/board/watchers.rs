//! One-shot change listeners.
//!
//! A `watch` call registers a listener; the next mutation resolves every
//! registered listener with a snapshot rendered from that listener's
//! perspective, in registration order, then discards them.

use tokio::sync::oneshot;

use super::cell::PlayerId;

#[derive(Debug, Default)]
pub(crate) struct ChangeListeners {
    listeners: Vec<(PlayerId, oneshot::Sender<String>)>,
}

impl ChangeListeners {
    /// Registers a listener for `player` and returns the handle its
    /// watch resolves through.
    pub(crate) fn register(&mut self, player: &str) -> oneshot::Receiver<String> {
        let (tx, rx) = oneshot::channel();
        self.listeners.push((player.to_string(), tx));
        rx
    }

    /// Takes every pending listener, in registration order.
    pub(crate) fn take(&mut self) -> Vec<(PlayerId, oneshot::Sender<String>)> {
        std::mem::take(&mut self.listeners)
    }

    /// Number of pending listeners.
    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    /// True when no listener is pending.
    pub(crate) fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
