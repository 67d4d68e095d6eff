//! Persistence gateway for categories and notes.
//!
//! # Responsibility
//! - Own the SQLite connection and the change bus for one app session.
//! - Hand out repository views and change subscriptions.
//! - Provide the bulk reset used by "clear all data".
//!
//! # Invariants
//! - A `Store` is constructed explicitly and passed by reference; there is no
//!   process-wide shared instance.
//! - `notify` is called only after a successful commit.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::events::{ChangeBus, ChangeSubscription, StoreChange};
use crate::repo::category_repo::SqliteCategoryRepository;
use crate::repo::note_repo::SqliteNoteRepository;
use crate::repo::RepoResult;
use log::{info, warn};
use rusqlite::Connection;
use std::path::Path;

/// SQLite-backed store plus change notification fan-out.
pub struct Store {
    conn: Connection,
    changes: ChangeBus,
}

impl Store {
    /// Opens (creating when missing) a file-backed store.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens an empty, process-private store.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            changes: ChangeBus::default(),
        }
    }

    pub fn categories(&self) -> SqliteCategoryRepository<'_> {
        SqliteCategoryRepository::new(&self.conn)
    }

    pub fn notes(&self) -> SqliteNoteRepository<'_> {
        SqliteNoteRepository::new(&self.conn)
    }

    pub fn changes(&self) -> &ChangeBus {
        &self.changes
    }

    pub fn subscribe(&self) -> ChangeSubscription {
        self.changes.subscribe()
    }

    pub fn notify(&self, change: StoreChange) {
        self.changes.publish(change);
    }

    /// Deletes every note and category in one transaction.
    ///
    /// Default categories are not re-seeded here; that only happens at
    /// bootstrap.
    pub fn reset_all_data(&self) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let notes = tx.execute("DELETE FROM notes;", [])?;
        let categories = tx.execute("DELETE FROM categories;", [])?;
        if let Err(err) = tx.commit() {
            warn!("event=store_reset module=store status=error error={err}");
            return Err(err.into());
        }

        info!(
            "event=store_reset module=store status=ok notes_deleted={} categories_deleted={}",
            notes, categories
        );
        self.notify(StoreChange::Notes);
        self.notify(StoreChange::Categories);
        Ok(())
    }
}
