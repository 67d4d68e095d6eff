//! Store change notifications.
//!
//! # Responsibility
//! - Fan out "this record kind changed" signals after committed writes.
//! - Let listings re-query on push instead of polling.
//!
//! # Invariants
//! - Notifications are only emitted after the write succeeded.
//! - Publishing never blocks and never fails; with no subscribers the
//!   signal is dropped.
//!
//! Only the synchronous half of `tokio::sync::broadcast` is used, so no
//! runtime is required.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

const DEFAULT_CAPACITY: usize = 64;

/// Record kind touched by a committed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreChange {
    Categories,
    Notes,
}

/// In-process fan-out of [`StoreChange`] signals.
#[derive(Debug)]
pub struct ChangeBus {
    sender: broadcast::Sender<StoreChange>,
}

impl ChangeBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, change: StoreChange) {
        // Err only means nobody is listening.
        let _ = self.sender.send(change);
    }

    pub fn subscribe(&self) -> ChangeSubscription {
        ChangeSubscription {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Set of pending changes collected by [`ChangeSubscription::drain`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingChanges {
    pub categories: bool,
    pub notes: bool,
}

impl PendingChanges {
    /// Everything dirty; used when signals were lost.
    pub fn all() -> Self {
        Self {
            categories: true,
            notes: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.categories && !self.notes
    }

    /// Adds the flags of `other` to this set.
    pub fn merge(&mut self, other: PendingChanges) {
        self.categories |= other.categories;
        self.notes |= other.notes;
    }

    fn mark(&mut self, change: StoreChange) {
        match change {
            StoreChange::Categories => self.categories = true,
            StoreChange::Notes => self.notes = true,
        }
    }
}

/// Receiving end held by one listing.
#[derive(Debug)]
pub struct ChangeSubscription {
    receiver: broadcast::Receiver<StoreChange>,
}

impl ChangeSubscription {
    /// Collects every signal received since the last drain.
    ///
    /// A lagged receiver has lost signals and reports everything as changed.
    pub fn drain(&mut self) -> PendingChanges {
        let mut pending = PendingChanges::default();
        loop {
            match self.receiver.try_recv() {
                Ok(change) => pending.mark(change),
                Err(TryRecvError::Lagged(_)) => pending = PendingChanges::all(),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return pending,
            }
        }
    }
}
