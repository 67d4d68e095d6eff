//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Publish store change signals after committed writes.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod category_service;
pub mod note_service;

use crate::repo::category_repo::SqliteCategoryRepository;
use crate::repo::note_repo::SqliteNoteRepository;
use crate::store::Store;
use category_service::CategoryService;
use note_service::NoteService;

impl Store {
    /// Category service bound to this store.
    pub fn category_service(&self) -> CategoryService<'_, SqliteCategoryRepository<'_>> {
        CategoryService::new(self.categories(), self.changes())
    }

    /// Note service bound to this store.
    pub fn note_service(
        &self,
    ) -> NoteService<'_, SqliteNoteRepository<'_>, SqliteCategoryRepository<'_>> {
        NoteService::new(self.notes(), self.categories(), self.changes())
    }
}
