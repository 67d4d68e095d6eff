//! Runtime configuration for the calendar core.
//!
//! # Responsibility
//! - Resolve the store location, log settings and calendar locale from the
//!   environment (CLI) or from explicit values (FFI).
//!
//! # Invariants
//! - An unset or blank `TIECAL_DB_PATH` falls back to a file in the temp dir.
//! - `:memory:` selects a process-private in-memory store.

use crate::calendar::locale::CalendarLocale;
use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TIECAL_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "TIECAL_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "TIECAL_LOG_DIR";
pub const LOCALE_ENV: &str = "TIECAL_LOCALE";

const DEFAULT_DB_FILE_NAME: &str = "tiecal.sqlite3";
const IN_MEMORY_MARKER: &str = ":memory:";

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    InMemory,
}

impl StoreLocation {
    /// Interprets a raw path value; blank values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed == IN_MEMORY_MARKER {
            Some(Self::InMemory)
        } else {
            Some(Self::File(PathBuf::from(trimmed)))
        }
    }

    pub fn default_file() -> Self {
        Self::File(std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
    }
}

/// Core configuration resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub store: StoreLocation,
    pub log_level: String,
    /// File logging is enabled only when set.
    pub log_dir: Option<PathBuf>,
    pub locale: CalendarLocale,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            store: StoreLocation::default_file(),
            log_level: default_log_level().to_string(),
            log_dir: None,
            locale: CalendarLocale::default(),
        }
    }
}

impl CoreConfig {
    /// Reads configuration from `TIECAL_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            store: lookup(DB_PATH_ENV)
                .and_then(|raw| StoreLocation::parse(&raw))
                .unwrap_or(defaults.store),
            log_level: non_blank(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: non_blank(LOG_DIR_ENV).map(PathBuf::from),
            locale: non_blank(LOCALE_ENV)
                .map(|tag| CalendarLocale::from_tag(&tag))
                .unwrap_or(defaults.locale),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            store: StoreLocation::InMemory,
            ..Self::default()
        }
    }
}
