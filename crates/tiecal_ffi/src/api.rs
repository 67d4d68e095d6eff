//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the calendar screen contract to Dart via FRB.
//! - Flatten core types into UI-friendly envelopes (strings, epoch ms).
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - A session exists only after a successful bootstrap; bootstrap failure is
//!   returned as an error and the UI must not continue without a session.
//! - Ids cross the boundary as UUID strings, dates as epoch milliseconds.

use chrono::{DateTime, Local, NaiveDate, Utc};
use log::info;
use std::sync::{Mutex, MutexGuard};
use tiecal_core::calendar::navigation::is_weekend;
use tiecal_core::{
    bootstrap_store, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, CalendarLocale, CalendarScreen, CategoryColor, CategoryId, CoreConfig,
    DayDirection, FontMetrics, NoteId, StoreLocation, WeekTransition,
};
use uuid::Uuid;

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message on failure.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Palette tokens in picker order.
#[flutter_rust_bridge::frb(sync)]
pub fn category_palette() -> Vec<String> {
    CategoryColor::ALL
        .iter()
        .map(|color| color.token().to_string())
        .collect()
}

/// Opens the calendar store and starts a screen session on today's date.
///
/// `db_path`: file path, `:memory:`, or blank for the default temp file.
/// `locale`: tag such as `ru_RU` or `en_US`.
///
/// # Errors
/// Returns the bootstrap failure message; the store is unusable and the app
/// should stop.
#[flutter_rust_bridge::frb(sync)]
pub fn open_calendar(db_path: String, locale: String) -> Result<CalendarSession, String> {
    let config = CoreConfig {
        store: StoreLocation::parse(&db_path).unwrap_or_else(StoreLocation::default_file),
        locale: CalendarLocale::from_tag(&locale),
        ..CoreConfig::default()
    };
    let store = bootstrap_store(&config).map_err(|err| err.to_string())?;
    let screen = CalendarScreen::new(store, Local::now(), config.locale)
        .map_err(|err| format!("open_calendar failed: {err}"))?;
    info!(
        "event=session_open module=ffi status=ok locale={}",
        config.locale.tag()
    );
    Ok(CalendarSession {
        screen: Mutex::new(screen),
    })
}

/// One day cell of the week strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDayItem {
    /// `YYYY-MM-DD`.
    pub iso_date: String,
    pub day_of_month: u32,
    pub is_selected: bool,
    pub is_weekend: bool,
}

/// Category row for pickers and note badges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryItem {
    pub id: String,
    pub name: String,
    /// Palette token, e.g. `noteBlue`.
    pub color: String,
}

/// Note card data for the note list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub collapsed_text: String,
    pub expanded_text: String,
    pub date_epoch_ms: i64,
    /// `None` when the note has no (or a deleted) category.
    pub category: Option<CategoryItem>,
    pub collapsible: bool,
    /// Line cap for the collapsed card; `None` when not collapsible.
    pub collapsed_line_limit: Option<u32>,
}

/// Note list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesResponse {
    pub ok: bool,
    /// True when the store has no notes; the UI shows its placeholder.
    pub is_empty: bool,
    pub items: Vec<NoteItem>,
    pub message: String,
}

/// Category list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoriesResponse {
    pub ok: bool,
    pub items: Vec<CategoryItem>,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created record, when any.
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Opaque screen session held by the Dart side.
#[flutter_rust_bridge::frb(opaque)]
pub struct CalendarSession {
    screen: Mutex<CalendarScreen<Local>>,
}

impl CalendarSession {
    /// Selected date as epoch milliseconds.
    #[flutter_rust_bridge::frb(sync)]
    pub fn selected_date_epoch_ms(&self) -> Result<i64, String> {
        Ok(self.lock()?.selected_date().timestamp_millis())
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn month_year_label(&self) -> Result<String, String> {
        Ok(self.lock()?.month_year_label())
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn week_window(&self) -> Result<Vec<WeekDayItem>, String> {
        let screen = self.lock()?;
        let navigator = screen.navigator();
        Ok(screen
            .week_window()
            .into_iter()
            .map(|day| WeekDayItem {
                iso_date: day.format("%Y-%m-%d").to_string(),
                day_of_month: chrono::Datelike::day(&day),
                is_selected: navigator.is_selected(day),
                is_weekend: is_weekend(day),
            })
            .collect())
    }

    /// Replaces the selected date. Returns `unchanged|forward|backward`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn set_selected_date(&self, epoch_ms: i64) -> Result<String, String> {
        let date = DateTime::<Utc>::from_timestamp_millis(epoch_ms)
            .ok_or_else(|| format!("timestamp out of range: {epoch_ms}"))?
            .with_timezone(&Local);
        Ok(transition_label(self.lock()?.set_selected_date(date)).to_string())
    }

    /// Selects a week strip day given as `YYYY-MM-DD`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn select_day(&self, iso_date: String) -> Result<String, String> {
        let day = NaiveDate::parse_from_str(iso_date.trim(), "%Y-%m-%d")
            .map_err(|err| format!("invalid date `{iso_date}`: {err}"))?;
        Ok(transition_label(self.lock()?.select_day(day)).to_string())
    }

    /// Flips one day. Returns `unchanged|forward|backward`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn advance_day(&self, forward: bool) -> Result<String, String> {
        let direction = if forward {
            DayDirection::Forward
        } else {
            DayDirection::Backward
        };
        Ok(transition_label(self.lock()?.advance_day(direction)).to_string())
    }

    /// Note list with collapse decisions for the card body width/font size.
    #[flutter_rust_bridge::frb(sync)]
    pub fn notes(&self, body_width: f64, font_size: f64) -> NotesResponse {
        let failure = |message: String| NotesResponse {
            ok: false,
            is_empty: false,
            items: Vec::new(),
            message,
        };
        let mut screen = match self.lock() {
            Ok(screen) => screen,
            Err(err) => return failure(err),
        };
        let metrics = FontMetrics::new(font_size as f32);
        match screen.note_cards(body_width as f32, &metrics) {
            Ok(cards) => {
                let items = cards
                    .into_iter()
                    .map(|card| NoteItem {
                        id: card.entry.note.id.to_string(),
                        title: card.entry.note.title,
                        collapsed_line_limit: card
                            .presentation
                            .visible_lines(false)
                            .map(|lines| lines as u32),
                        collapsible: card.presentation.collapsible,
                        collapsed_text: card.presentation.collapsed_text,
                        expanded_text: card.presentation.expanded_text,
                        date_epoch_ms: card.entry.note.date.timestamp_millis(),
                        category: card.entry.category.category().map(to_category_item),
                    })
                    .collect::<Vec<_>>();
                let message = if items.is_empty() {
                    "No notes.".to_string()
                } else {
                    format!("{} note(s).", items.len())
                };
                NotesResponse {
                    ok: true,
                    is_empty: items.is_empty(),
                    items,
                    message,
                }
            }
            Err(err) => failure(format!("notes failed: {err}")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn categories(&self) -> CategoriesResponse {
        let listed = self.lock().and_then(|mut screen| {
            screen
                .categories()
                .map(|categories| categories.iter().map(to_category_item).collect())
                .map_err(|err| format!("categories failed: {err}"))
        });
        match listed {
            Ok(items) => CategoriesResponse {
                ok: true,
                items,
                message: String::new(),
            },
            Err(message) => CategoriesResponse {
                ok: false,
                items: Vec::new(),
                message,
            },
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn create_category(&self, name: String, color: String) -> ActionResponse {
        let color = match CategoryColor::from_token(color.trim()) {
            Ok(color) => color,
            Err(err) => return ActionResponse::failure(format!("create_category failed: {err}")),
        };
        let mut screen = match self.lock() {
            Ok(screen) => screen,
            Err(err) => return ActionResponse::failure(err),
        };
        match screen.create_category(name, color) {
            Ok(category) => {
                ActionResponse::success("Category created.", Some(category.id.to_string()))
            }
            Err(err) => ActionResponse::failure(format!("create_category failed: {err}")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn create_note(
        &self,
        title: String,
        content: String,
        category_id: String,
    ) -> ActionResponse {
        let category_id: CategoryId = match parse_id(&category_id) {
            Ok(id) => id,
            Err(err) => return ActionResponse::failure(format!("create_note failed: {err}")),
        };
        let mut screen = match self.lock() {
            Ok(screen) => screen,
            Err(err) => return ActionResponse::failure(err),
        };
        match screen.create_note(title, content, category_id) {
            Ok(note) => ActionResponse::success("Note created.", Some(note.id.to_string())),
            Err(err) => ActionResponse::failure(format!("create_note failed: {err}")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn delete_note(&self, note_id: String) -> ActionResponse {
        let note_id: NoteId = match parse_id(&note_id) {
            Ok(id) => id,
            Err(err) => return ActionResponse::failure(format!("delete_note failed: {err}")),
        };
        let mut screen = match self.lock() {
            Ok(screen) => screen,
            Err(err) => return ActionResponse::failure(err),
        };
        match screen.delete_note(note_id) {
            Ok(()) => ActionResponse::success("Note deleted.", None),
            Err(err) => ActionResponse::failure(format!("delete_note failed: {err}")),
        }
    }

    /// Deletes a category; its notes stay and lose the category.
    #[flutter_rust_bridge::frb(sync)]
    pub fn delete_category(&self, category_id: String) -> ActionResponse {
        let category_id: CategoryId = match parse_id(&category_id) {
            Ok(id) => id,
            Err(err) => return ActionResponse::failure(format!("delete_category failed: {err}")),
        };
        let mut screen = match self.lock() {
            Ok(screen) => screen,
            Err(err) => return ActionResponse::failure(err),
        };
        match screen.delete_category(category_id) {
            Ok(()) => ActionResponse::success("Category deleted.", None),
            Err(err) => ActionResponse::failure(format!("delete_category failed: {err}")),
        }
    }

    /// Deletes all notes and categories. Defaults come back on next launch.
    #[flutter_rust_bridge::frb(sync)]
    pub fn reset_all_data(&self) -> ActionResponse {
        let mut screen = match self.lock() {
            Ok(screen) => screen,
            Err(err) => return ActionResponse::failure(err),
        };
        match screen.reset_all_data() {
            Ok(()) => ActionResponse::success("All data deleted.", None),
            Err(err) => ActionResponse::failure(format!("reset_all_data failed: {err}")),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, CalendarScreen<Local>>, String> {
        self.screen
            .lock()
            .map_err(|_| "calendar session is poisoned".to_string())
    }
}

fn to_category_item(category: &tiecal_core::Category) -> CategoryItem {
    CategoryItem {
        id: category.id.to_string(),
        name: category.name.clone(),
        color: category.color.token().to_string(),
    }
}

fn parse_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid id `{value}`"))
}

fn transition_label(transition: WeekTransition) -> &'static str {
    match transition {
        WeekTransition::Unchanged => "unchanged",
        WeekTransition::Forward => "forward",
        WeekTransition::Backward => "backward",
    }
}
