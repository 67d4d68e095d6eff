//! Note use-case service.
//!
//! # Responsibility
//! - Validate and persist new notes, stamping the save time.
//! - Hard-delete notes.
//! - Produce the ordered note listing with resolved categories.
//!
//! # Invariants
//! - Note list is always sorted by `date ASC, id ASC` and never filtered by
//!   the selected calendar day.
//! - An empty store yields `NoteListing::Empty`, never an empty `Notes`.
//! - Validation (empty content, unknown category) runs before any write.

use crate::events::{ChangeBus, StoreChange};
use crate::model::category::{Category, CategoryId};
use crate::model::note::{CategoryRef, Note, NoteId, NoteValidationError};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::note_repo::NoteRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::{SubsecRound, Utc};
use log::{info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    Validation(NoteValidationError),
    /// Target note does not exist (already deleted or never created).
    NoteNotFound(NoteId),
    Repo(RepoError),
    InconsistentState(&'static str),
}

impl NoteServiceError {
    /// Whether the request was rejected before touching storage.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// One listed note with its category resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub note: Note,
    pub category: CategoryRef,
}

/// Note list shown on the calendar screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteListing {
    /// No notes exist; the UI shows its "no notes" placeholder.
    Empty,
    /// Notes ordered oldest first. Never empty.
    Notes(Vec<NoteEntry>),
}

impl NoteListing {
    pub fn entries(&self) -> &[NoteEntry] {
        match self {
            Self::Empty => &[],
            Self::Notes(entries) => entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Note service facade over note and category repositories.
pub struct NoteService<'bus, N: NoteRepository, C: CategoryRepository> {
    notes: N,
    categories: C,
    bus: &'bus ChangeBus,
}

impl<'bus, N: NoteRepository, C: CategoryRepository> NoteService<'bus, N, C> {
    pub fn new(notes: N, categories: C, bus: &'bus ChangeBus) -> Self {
        Self {
            notes,
            categories,
            bus,
        }
    }

    /// Creates one note in `category_id`, dated now.
    ///
    /// The title may be empty; the content may not.
    pub fn create_note(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        category_id: CategoryId,
    ) -> Result<Note, NoteServiceError> {
        let content = content.into();
        if content.is_empty() {
            return Err(NoteValidationError::EmptyContent.into());
        }
        if self.categories.get_category(category_id)?.is_none() {
            return Err(NoteValidationError::UnknownCategory(category_id).into());
        }

        // Storage keeps milliseconds; truncate so the returned value matches
        // what a later read yields.
        let date = Utc::now().trunc_subsecs(3);
        let note = Note::new(title, content, date, Some(category_id))?;

        if let Err(err) = self.notes.create_note(&note) {
            warn!(
                "event=note_create module=service status=error category_id={} error={}",
                category_id, err
            );
            return Err(err.into());
        }
        let stored = self
            .notes
            .get_note(note.id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))?;

        info!(
            "event=note_create module=service status=ok note_id={} content_chars={}",
            stored.id,
            stored.content.chars().count()
        );
        self.bus.publish(StoreChange::Notes);
        Ok(stored)
    }

    /// Deletes one note immediately and irreversibly.
    pub fn delete_note(&self, id: NoteId) -> Result<(), NoteServiceError> {
        match self.notes.delete_note(id) {
            Ok(()) => {
                info!("event=note_delete module=service status=ok note_id={id}");
                self.bus.publish(StoreChange::Notes);
                Ok(())
            }
            Err(RepoError::NotFound { .. }) => {
                warn!(
                    "event=note_delete module=service status=error note_id={id} error_code=not_found"
                );
                Err(NoteServiceError::NoteNotFound(id))
            }
            Err(err) => {
                warn!("event=note_delete module=service status=error note_id={id} error={err}");
                Err(err.into())
            }
        }
    }

    pub fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.notes.get_note(id)
    }

    /// Lists every note, oldest first, with categories resolved.
    pub fn list_notes(&self) -> RepoResult<NoteListing> {
        let notes = self.notes.list_notes()?;
        if notes.is_empty() {
            return Ok(NoteListing::Empty);
        }

        let by_id: HashMap<CategoryId, Category> = self
            .categories
            .list_categories()?
            .into_iter()
            .map(|category| (category.id, category))
            .collect();

        let entries = notes
            .into_iter()
            .map(|note| {
                let category = note
                    .category
                    .and_then(|id| by_id.get(&id).cloned())
                    .map_or(CategoryRef::Unset, CategoryRef::Assigned);
                NoteEntry { note, category }
            })
            .collect();
        Ok(NoteListing::Notes(entries))
    }
}
