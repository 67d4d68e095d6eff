//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the persistence gateway contracts for categories and notes
//!   (`create`, sorted `list`, `get`, `delete`, `count`).
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Deleting a missing row is a `NotFound` error, not a silent no-op.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_repo;
pub mod note_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error shared by category and note repositories.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Row addressed by kind and id does not exist.
    NotFound {
        kind: &'static str,
        id: String,
    },
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<uuid::Uuid> {
    uuid::Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

/// Converts a SQL `COUNT(*)` result, rejecting negative values.
pub(crate) fn checked_count(count: i64) -> RepoResult<u64> {
    u64::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("negative row count {count}")))
}

#[cfg(test)]
mod tests {
    use super::{checked_count, RepoError};

    #[test]
    fn checked_count_rejects_negative_values() {
        assert_eq!(checked_count(3).unwrap(), 3);
        assert!(matches!(checked_count(-1), Err(RepoError::InvalidData(_))));
    }
}
