//! Core domain logic for the T.I.E Calendar app.
//! This crate is the single source of truth for business invariants; the
//! mobile UI only renders what it exposes.

pub mod bootstrap;
pub mod calendar;
pub mod config;
pub mod db;
pub mod events;
pub mod logging;
pub mod model;
pub mod presentation;
pub mod repo;
pub mod screen;
pub mod service;
pub mod store;

pub use bootstrap::{bootstrap_store, seed_store, BootstrapError};
pub use calendar::locale::CalendarLocale;
pub use calendar::navigation::{DateNavigator, DayDirection, WeekTransition};
pub use config::{CoreConfig, StoreLocation};
pub use events::{ChangeBus, ChangeSubscription, PendingChanges, StoreChange};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{
    Category, CategoryColor, CategoryId, CategoryValidationError, DEFAULT_CATEGORIES,
};
pub use model::note::{CategoryRef, Note, NoteId, NoteValidationError};
pub use presentation::truncation::{
    estimate_line_count, should_collapse, strip_blank_lines, FontMetrics, NotePresentation,
    TextMeasure, COLLAPSED_LINE_LIMIT,
};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::{RepoError, RepoResult};
pub use screen::{CalendarScreen, NoteCard};
pub use service::category_service::{CategoryService, CategoryServiceError};
pub use service::note_service::{NoteEntry, NoteListing, NoteService, NoteServiceError};
pub use store::Store;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
