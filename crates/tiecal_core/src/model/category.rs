//! Category domain model.
//!
//! # Responsibility
//! - Define the colored tag a note may belong to.
//! - Own the closed color palette and its token strings.
//!
//! # Invariants
//! - `id` is stable and never reused for another category.
//! - `name` is never empty (whitespace-only names are accepted).
//! - `color` is always one of the eight palette tokens.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a category.
pub type CategoryId = Uuid;

/// Closed color palette for categories.
///
/// Serialized with the asset token names used by the UI color catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryColor {
    #[default]
    NoteBlue,
    NoteYellow,
    NoteRed,
    NoteGreen,
    NoteOrange,
    NotePurple,
    NotePink,
    NoteGray,
}

impl CategoryColor {
    /// Palette in picker order.
    pub const ALL: [CategoryColor; 8] = [
        Self::NoteBlue,
        Self::NoteYellow,
        Self::NoteRed,
        Self::NoteGreen,
        Self::NoteOrange,
        Self::NotePurple,
        Self::NotePink,
        Self::NoteGray,
    ];

    /// Returns the token string used for storage and the UI asset catalog.
    pub fn token(self) -> &'static str {
        match self {
            Self::NoteBlue => "noteBlue",
            Self::NoteYellow => "noteYellow",
            Self::NoteRed => "noteRed",
            Self::NoteGreen => "noteGreen",
            Self::NoteOrange => "noteOrange",
            Self::NotePurple => "notePurple",
            Self::NotePink => "notePink",
            Self::NoteGray => "noteGray",
        }
    }

    /// Parses a palette token. Matching is exact.
    pub fn from_token(value: &str) -> Result<Self, CategoryValidationError> {
        Self::ALL
            .into_iter()
            .find(|color| color.token() == value)
            .ok_or_else(|| CategoryValidationError::UnknownColor(value.to_string()))
    }
}

impl Display for CategoryColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Validation errors for category creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    UnknownColor(String),
}

impl Display for CategoryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "category name cannot be empty"),
            Self::UnknownColor(value) => write!(f, "unknown category color token `{value}`"),
        }
    }
}

impl Error for CategoryValidationError {}

/// Named, colored tag for notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub color: CategoryColor,
    /// Epoch milliseconds. Drives listing order.
    pub created_at: i64,
}

impl Category {
    /// Creates a category with a generated id.
    pub fn new(
        name: impl Into<String>,
        color: CategoryColor,
        created_at: i64,
    ) -> Result<Self, CategoryValidationError> {
        Self::with_id(Uuid::new_v4(), name, color, created_at)
    }

    /// Creates a category with a caller-provided id.
    ///
    /// Used by the repository read path where identity already exists.
    pub fn with_id(
        id: CategoryId,
        name: impl Into<String>,
        color: CategoryColor,
        created_at: i64,
    ) -> Result<Self, CategoryValidationError> {
        let category = Self {
            id,
            name: name.into(),
            color,
            created_at,
        };
        category.validate()?;
        Ok(category)
    }

    /// Checks the name invariant.
    ///
    /// Only emptiness is checked; `"   "` is a valid name.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Categories seeded into an empty store, in display order.
pub const DEFAULT_CATEGORIES: [(&str, CategoryColor); 5] = [
    ("Событие", CategoryColor::NoteOrange),
    ("Задача", CategoryColor::NoteBlue),
    ("Идея", CategoryColor::NoteYellow),
    ("Заметка", CategoryColor::NoteRed),
    ("Другое", CategoryColor::NoteGray),
];

#[cfg(test)]
mod tests {
    use super::{Category, CategoryColor, CategoryValidationError};

    #[test]
    fn tokens_parse_back_to_the_same_color() {
        for color in CategoryColor::ALL {
            assert_eq!(CategoryColor::from_token(color.token()), Ok(color));
        }
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = CategoryColor::from_token("blue").unwrap_err();
        assert_eq!(err, CategoryValidationError::UnknownColor("blue".to_string()));
    }

    #[test]
    fn default_color_is_blue() {
        assert_eq!(CategoryColor::default(), CategoryColor::NoteBlue);
    }

    #[test]
    fn empty_name_is_rejected_but_whitespace_is_not() {
        assert_eq!(
            Category::new("", CategoryColor::NoteRed, 0).unwrap_err(),
            CategoryValidationError::EmptyName
        );
        assert!(Category::new("  ", CategoryColor::NoteRed, 0).is_ok());
    }
}
