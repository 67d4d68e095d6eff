//! Note domain model.
//!
//! # Responsibility
//! - Define the user-authored note record and its category relation.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `content` is non-empty at creation; `title` may be empty.
//! - `date` is set once at save time and never touched afterwards.

use crate::model::category::{Category, CategoryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Validation errors raised before a note is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyContent,
    /// The chosen category does not exist in the store.
    UnknownCategory(CategoryId),
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content cannot be empty"),
            Self::UnknownCategory(id) => write!(f, "category does not exist: {id}"),
        }
    }
}

impl Error for NoteValidationError {}

/// User-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    /// Relation only; the category outlives or predeceases the note freely.
    pub category: Option<CategoryId>,
}

impl Note {
    /// Creates a note with a generated id.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        date: DateTime<Utc>,
        category: Option<CategoryId>,
    ) -> Result<Self, NoteValidationError> {
        let note = Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            date,
            category,
        };
        note.validate()?;
        Ok(note)
    }

    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.content.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(())
    }
}

/// Resolved category of a listed note.
///
/// `Unset` covers both "never assigned" and "assigned category was deleted".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    Assigned(Category),
    Unset,
}

impl CategoryRef {
    pub fn category(&self) -> Option<&Category> {
        match self {
            Self::Assigned(category) => Some(category),
            Self::Unset => None,
        }
    }
}
