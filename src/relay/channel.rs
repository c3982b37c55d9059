//! Client Channel
//!
//! Per-client rendezvous used to hand a single message from a sender
//! task to the one blocked receiver, with an explicit Active -> Left
//! lifecycle so either side can end the rendezvous on departure.
//!
//! The blocking receive is modelled as one `select!` over three event
//! sources: the message slot, the long-poll timer, and the departure
//! signal. The select is biased with departure first so a close always
//! wins over a message that raced into the slot.

use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};

/// Outcome of a blocking receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receive {
    /// A message was handed off before the timeout.
    Delivered(String),
    /// No message arrived within the timeout. Success, not an error;
    /// the long-poll loop is expected to retry.
    TimedOut,
    /// The channel left the Active state while (or before) waiting.
    Closed,
}

/// One-slot rendezvous endpoint owned by a single client session.
pub struct ClientChannel {
    message_tx: mpsc::Sender<String>,
    message_rx: Mutex<mpsc::Receiver<String>>,
    left_tx: watch::Sender<bool>,
}

impl ClientChannel {
    pub fn new() -> Self {
        // Capacity 1: at most one in-flight message per poll cycle.
        let (message_tx, message_rx) = mpsc::channel(1);
        let (left_tx, _) = watch::channel(false);
        Self {
            message_tx,
            message_rx: Mutex::new(message_rx),
            left_tx,
        }
    }

    /// Whether the channel has left the Active state.
    pub fn is_left(&self) -> bool {
        *self.left_tx.borrow()
    }

    /// Attempt to hand `message` to this client.
    ///
    /// Returns false immediately when the channel is already Left.
    /// Otherwise waits for the slot, racing against a concurrent
    /// `close`; returns true once the message is accepted, false when
    /// the channel goes Left first. Never blocks forever and never
    /// writes to a channel that has begun closing.
    pub async fn send(&self, message: String) -> bool {
        let mut left_rx = self.left_tx.subscribe();
        if *left_rx.borrow() {
            return false;
        }

        tokio::select! {
            biased;
            _ = left_rx.wait_for(|left| *left) => false,
            sent = self.message_tx.send(message) => sent.is_ok(),
        }
    }

    /// Block until a message arrives, `timeout` elapses, or the client
    /// leaves, whichever happens first.
    ///
    /// Once the channel is Left no message is delivered through it,
    /// even one already sitting in the slot.
    pub async fn receive(&self, timeout: Duration) -> Receive {
        let mut left_rx = self.left_tx.subscribe();
        if *left_rx.borrow() {
            return Receive::Closed;
        }

        let mut message_rx = self.message_rx.lock().await;
        tokio::select! {
            biased;
            _ = left_rx.wait_for(|left| *left) => Receive::Closed,
            message = message_rx.recv() => match message {
                Some(message) => Receive::Delivered(message),
                None => Receive::Closed,
            },
            () = tokio::time::sleep(timeout) => Receive::TimedOut,
        }
    }

    /// Transition Active -> Left. Idempotent; wakes any pending send
    /// or receive, which then observe false / `Closed`.
    pub fn close(&self) {
        self.left_tx.send_replace(true);
    }
}

impl Default for ClientChannel {
    fn default() -> Self {
        Self::new()
    }
}
