//! View-layer contract for the calendar screen.
//!
//! # Responsibility
//! - Bundle the store, date navigation and listings for one screen session.
//! - Keep note/category listings fresh by re-querying on change signals.
//!
//! # Invariants
//! - The selected date is owned here; nothing else mutates it.
//! - Listings are re-read only after a change signal for their record kind.
//! - A pending signal is cleared only once its re-query succeeded.
//! - A failed write leaves both the selected date and the cached listings as
//!   they were.

use crate::calendar::locale::CalendarLocale;
use crate::calendar::navigation::{DateNavigator, DayDirection, WeekTransition};
use crate::events::{ChangeSubscription, PendingChanges};
use crate::model::category::{Category, CategoryColor, CategoryId};
use crate::model::note::{Note, NoteId};
use crate::presentation::truncation::{NotePresentation, TextMeasure, COLLAPSED_LINE_LIMIT};
use crate::repo::RepoResult;
use crate::service::category_service::CategoryServiceError;
use crate::service::note_service::{NoteEntry, NoteListing, NoteServiceError};
use crate::store::Store;
use chrono::{DateTime, NaiveDate, TimeZone};

/// Note entry plus its display decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub entry: NoteEntry,
    pub presentation: NotePresentation,
}

/// One screen session over a store.
pub struct CalendarScreen<Tz: TimeZone> {
    store: Store,
    navigator: DateNavigator<Tz>,
    subscription: ChangeSubscription,
    pending: PendingChanges,
    notes: NoteListing,
    categories: Vec<Category>,
}

impl<Tz: TimeZone> CalendarScreen<Tz> {
    /// Opens a session with `today` selected and loads both listings.
    pub fn new(store: Store, today: DateTime<Tz>, locale: CalendarLocale) -> RepoResult<Self> {
        let subscription = store.subscribe();
        let notes = store.note_service().list_notes()?;
        let categories = store.category_service().list_categories()?;
        Ok(Self {
            store,
            navigator: DateNavigator::new(today, locale),
            subscription,
            pending: PendingChanges::default(),
            notes,
            categories,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Ends the session and hands the store back.
    pub fn into_store(self) -> Store {
        self.store
    }

    // Date navigation

    pub fn selected_date(&self) -> &DateTime<Tz> {
        self.navigator.selected_date()
    }

    pub fn week_window(&self) -> [NaiveDate; 7] {
        self.navigator.current_week_window()
    }

    pub fn month_year_label(&self) -> String {
        self.navigator.month_year_label()
    }

    pub fn navigator(&self) -> &DateNavigator<Tz> {
        &self.navigator
    }

    pub fn set_selected_date(&mut self, date: DateTime<Tz>) -> WeekTransition {
        self.navigator.set_selected_date(date)
    }

    pub fn select_day(&mut self, day: NaiveDate) -> WeekTransition {
        self.navigator.select_day(day)
    }

    pub fn advance_day(&mut self, direction: DayDirection) -> WeekTransition {
        self.navigator.advance_day(direction)
    }

    // Listings

    /// Re-reads the listings that have pending change signals.
    ///
    /// On a read failure the previous listing is kept, its signal stays
    /// pending and the first error is returned.
    pub fn refresh(&mut self) -> RepoResult<()> {
        let notes = self.refresh_notes();
        let categories = self.refresh_categories();
        notes.and(categories)
    }

    pub fn note_listing(&mut self) -> RepoResult<&NoteListing> {
        self.refresh_notes()?;
        Ok(&self.notes)
    }

    pub fn categories(&mut self) -> RepoResult<&[Category]> {
        self.refresh_categories()?;
        Ok(&self.categories)
    }

    /// Note cards with collapse decisions for the given body width and
    /// text metrics.
    pub fn note_cards(
        &mut self,
        width: f32,
        measure: &impl TextMeasure,
    ) -> RepoResult<Vec<NoteCard>> {
        self.refresh_notes()?;
        Ok(self
            .notes
            .entries()
            .iter()
            .map(|entry| NoteCard {
                presentation: NotePresentation::new(
                    &entry.note.content,
                    width,
                    measure,
                    COLLAPSED_LINE_LIMIT,
                ),
                entry: entry.clone(),
            })
            .collect())
    }

    // Writes

    pub fn create_category(
        &mut self,
        name: impl Into<String>,
        color: CategoryColor,
    ) -> Result<Category, CategoryServiceError> {
        self.store.category_service().create_category(name, color)
    }

    pub fn create_note(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        category_id: CategoryId,
    ) -> Result<Note, NoteServiceError> {
        self.store
            .note_service()
            .create_note(title, content, category_id)
    }

    pub fn delete_note(&mut self, id: NoteId) -> Result<(), NoteServiceError> {
        self.store.note_service().delete_note(id)
    }

    pub fn delete_category(&mut self, id: CategoryId) -> Result<(), CategoryServiceError> {
        self.store.category_service().delete_category(id)
    }

    /// Deletes every note and category. The selected date is kept.
    pub fn reset_all_data(&mut self) -> RepoResult<()> {
        self.store.reset_all_data()
    }

    fn collect_pending(&mut self) {
        let drained = self.subscription.drain();
        self.pending.merge(drained);
    }

    fn refresh_notes(&mut self) -> RepoResult<()> {
        self.collect_pending();
        if self.pending.notes {
            self.notes = self.store.note_service().list_notes()?;
            self.pending.notes = false;
        }
        Ok(())
    }

    fn refresh_categories(&mut self) -> RepoResult<()> {
        self.collect_pending();
        if self.pending.categories {
            self.categories = self.store.category_service().list_categories()?;
            self.pending.categories = false;
        }
        Ok(())
    }
}
