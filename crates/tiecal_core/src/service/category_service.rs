//! Category use-case service.
//!
//! # Responsibility
//! - Validate and persist user-created categories.
//! - Seed the default categories into an empty store.
//! - Delete categories with the null-out policy for referencing notes.
//!
//! # Invariants
//! - Validation runs before any write; a rejected request writes nothing.
//! - Change signals are published only after a successful write.

use crate::events::{ChangeBus, StoreChange};
use crate::model::category::{
    Category, CategoryColor, CategoryId, CategoryValidationError, DEFAULT_CATEGORIES,
};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::Utc;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for category use-cases.
#[derive(Debug)]
pub enum CategoryServiceError {
    Validation(CategoryValidationError),
    CategoryNotFound(CategoryId),
    Repo(RepoError),
    /// Write succeeded but the read-back did not see the row.
    InconsistentState(&'static str),
}

impl Display for CategoryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent category state: {details}")
            }
        }
    }
}

impl Error for CategoryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CategoryValidationError> for CategoryServiceError {
    fn from(value: CategoryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for CategoryServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Category service facade over a repository implementation.
pub struct CategoryService<'bus, R: CategoryRepository> {
    repo: R,
    bus: &'bus ChangeBus,
}

impl<'bus, R: CategoryRepository> CategoryService<'bus, R> {
    pub fn new(repo: R, bus: &'bus ChangeBus) -> Self {
        Self { repo, bus }
    }

    /// Creates one category and returns the stored record.
    pub fn create_category(
        &self,
        name: impl Into<String>,
        color: CategoryColor,
    ) -> Result<Category, CategoryServiceError> {
        let category = Category::new(name, color, Utc::now().timestamp_millis())?;

        if let Err(err) = self.repo.create_category(&category) {
            warn!(
                "event=category_create module=service status=error color={} error={}",
                color, err
            );
            return Err(err.into());
        }
        let stored = self
            .repo
            .get_category(category.id)?
            .ok_or(CategoryServiceError::InconsistentState(
                "created category not found in read-back",
            ))?;

        info!(
            "event=category_create module=service status=ok category_id={} color={}",
            stored.id, stored.color
        );
        self.bus.publish(StoreChange::Categories);
        Ok(stored)
    }

    /// Same as [`Self::create_category`] but takes the raw palette token.
    pub fn create_category_with_token(
        &self,
        name: impl Into<String>,
        color_token: &str,
    ) -> Result<Category, CategoryServiceError> {
        let color = CategoryColor::from_token(color_token)?;
        self.create_category(name, color)
    }

    /// Lists categories in creation order.
    pub fn list_categories(&self) -> RepoResult<Vec<Category>> {
        self.repo.list_categories()
    }

    pub fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        self.repo.get_category(id)
    }

    /// Deletes a category. Notes that referenced it keep existing with no
    /// category.
    pub fn delete_category(&self, id: CategoryId) -> Result<(), CategoryServiceError> {
        match self.repo.delete_category(id) {
            Ok(()) => {}
            Err(RepoError::NotFound { .. }) => {
                return Err(CategoryServiceError::CategoryNotFound(id))
            }
            Err(err) => {
                warn!(
                    "event=category_delete module=service status=error category_id={} error={}",
                    id, err
                );
                return Err(err.into());
            }
        }

        info!("event=category_delete module=service status=ok category_id={id}");
        self.bus.publish(StoreChange::Categories);
        self.bus.publish(StoreChange::Notes);
        Ok(())
    }

    /// Seeds the five default categories when the store has none.
    ///
    /// Returns the number of categories written; 0 on every run after the
    /// first.
    pub fn seed_default_categories(&self) -> RepoResult<usize> {
        let created_at = Utc::now().timestamp_millis();
        let defaults = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, color)| {
                Category::new(*name, *color, created_at)
                    .map_err(|err| RepoError::InvalidData(err.to_string()))
            })
            .collect::<RepoResult<Vec<_>>>()?;

        let written = self.repo.seed_if_empty(&defaults)?;
        if written > 0 {
            self.bus.publish(StoreChange::Categories);
        }
        info!("event=category_seed module=service status=ok created={written}");
        Ok(written)
    }
}
