//! Snapshot subscriptions (mechanics only).
//!
//! Every live "collection" surface hands out the same thing: a
//! [`Subscription`] that receives the full current record set after each
//! change. Delivery is best-effort fan-out (at-least-once, no ordering
//! guarantee across publishers), so subscribers recompute from whole
//! snapshots instead of patching deltas.

use std::sync::mpsc::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::sync::{mpsc, Mutex};
use std::time::Duration;

use chipstock_ledger::{LedgerStore, Lot};

/// A subscription to a snapshot stream.
///
/// Designed for single-threaded consumption; hand each subscription to one
/// consumer thread.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: Receiver<T>,
}

impl<T> Subscription<T> {
    pub fn new(receiver: Receiver<T>) -> Self {
        Self { receiver }
    }

    /// Block until the next snapshot is available.
    pub fn recv(&self) -> Result<T, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a snapshot without blocking.
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a snapshot.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Fan-out publisher behind the in-memory collections and logs.
///
/// - No IO / no async
/// - Best-effort: dead subscribers are dropped while publishing
#[derive(Debug, Default)]
pub struct SnapshotFeed<T> {
    subscribers: Mutex<Vec<mpsc::Sender<T>>>,
}

impl<T: Clone> SnapshotFeed<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn publish(&self, snapshot: T) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|tx| tx.send(snapshot.clone()).is_ok());
        }
    }

    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        Subscription::new(rx)
    }
}

/// Live read of the `inventory` collection: the ledger publishes its full
/// lot set after every successful mutation.
pub fn watch_ledger(ledger: &LedgerStore) -> Subscription<Vec<Lot>> {
    Subscription::new(ledger.watch())
}
