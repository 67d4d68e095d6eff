//! Store bootstrap: open, migrate, seed.
//!
//! # Responsibility
//! - Produce a ready `Store` for the configured location.
//! - Seed default categories into an empty store exactly once.
//!
//! # Invariants
//! - A `BootstrapError` means the local store is unusable; callers must not
//!   continue into note/category flows with it.
//! - Re-running bootstrap against a populated store creates no duplicates.

use crate::config::{CoreConfig, StoreLocation};
use crate::db::DbError;
use crate::repo::RepoError;
use crate::store::Store;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Fatal startup failure.
#[derive(Debug)]
pub enum BootstrapError {
    /// Store could not be opened or migrated.
    Open(DbError),
    /// Default category seeding failed.
    Seed(RepoError),
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "failed to open calendar store: {err}"),
            Self::Seed(err) => write!(f, "failed to seed default categories: {err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) => Some(err),
            Self::Seed(err) => Some(err),
        }
    }
}

/// Opens the configured store and seeds it when empty.
pub fn bootstrap_store(config: &CoreConfig) -> Result<Store, BootstrapError> {
    let store = match &config.store {
        StoreLocation::File(path) => Store::open(path),
        StoreLocation::InMemory => Store::open_in_memory(),
    };
    let store = store.map_err(|err| {
        error!("event=bootstrap module=core status=error stage=open error={err}");
        BootstrapError::Open(err)
    })?;
    seed_store(store)
}

/// Seeds an already opened store.
pub fn seed_store(store: Store) -> Result<Store, BootstrapError> {
    let started_at = Instant::now();
    let created = store
        .category_service()
        .seed_default_categories()
        .map_err(|err| {
            error!("event=bootstrap module=core status=error stage=seed error={err}");
            BootstrapError::Seed(err)
        })?;

    info!(
        "event=bootstrap module=core status=ok seeded_categories={} duration_ms={}",
        created,
        started_at.elapsed().as_millis()
    );
    Ok(store)
}
