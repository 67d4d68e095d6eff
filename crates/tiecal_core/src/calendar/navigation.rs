//! Selected-date state for the calendar screen.
//!
//! # Responsibility
//! - Hold the single selected date for one screen session.
//! - Derive the displayed week window and the month/year label from it.
//! - Apply day flips in local wall-clock time.
//!
//! # Invariants
//! - The week window always has 7 consecutive days and contains the
//!   selected day.
//! - The displayed week start is recomputed from the selected date on every
//!   change, never shifted incrementally.
//! - Nothing here is persisted.

use crate::calendar::locale::CalendarLocale;
use chrono::{
    DateTime, Datelike, Days, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Weekday,
};
use unicode_segmentation::UnicodeSegmentation;

/// Direction of a one-day flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayDirection {
    Forward,
    Backward,
}

/// How the displayed week changed after a date update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekTransition {
    Unchanged,
    /// Moved to a later week; the strip slides in from the right.
    Forward,
    Backward,
}

/// Selected date plus the week it is displayed in.
#[derive(Debug, Clone)]
pub struct DateNavigator<Tz: TimeZone> {
    selected: DateTime<Tz>,
    locale: CalendarLocale,
    displayed_week_start: NaiveDate,
}

impl<Tz: TimeZone> DateNavigator<Tz> {
    pub fn new(selected: DateTime<Tz>, locale: CalendarLocale) -> Self {
        let displayed_week_start = week_start_of(selected.date_naive(), locale.week_start());
        Self {
            selected,
            locale,
            displayed_week_start,
        }
    }

    pub fn selected_date(&self) -> &DateTime<Tz> {
        &self.selected
    }

    /// Calendar day of the selected date in its own time zone.
    pub fn selected_day(&self) -> NaiveDate {
        self.selected.date_naive()
    }

    pub fn locale(&self) -> CalendarLocale {
        self.locale
    }

    /// Replaces the selected date. Any date is accepted.
    pub fn set_selected_date(&mut self, date: DateTime<Tz>) -> WeekTransition {
        self.selected = date;
        self.sync_displayed_week()
    }

    /// Picks a day from the week strip, keeping the current time of day.
    pub fn select_day(&mut self, day: NaiveDate) -> WeekTransition {
        let target = day.and_time(self.selected.naive_local().time());
        self.selected = resolve_local(&self.selected.timezone(), target);
        self.sync_displayed_week()
    }

    /// Moves the selected date one calendar day forward or backward.
    ///
    /// The local wall-clock time is kept. On a DST fold the earlier instant
    /// wins; inside a DST gap the time is pushed forward by one hour.
    pub fn advance_day(&mut self, direction: DayDirection) -> WeekTransition {
        self.selected = shift_day(&self.selected, direction);
        self.sync_displayed_week()
    }

    /// The 7 days of the week containing the selected date.
    pub fn current_week_window(&self) -> [NaiveDate; 7] {
        week_window(self.displayed_week_start)
    }

    pub fn displayed_week_start(&self) -> NaiveDate {
        self.displayed_week_start
    }

    /// `Октябрь 2026`-style label for the selected month.
    pub fn month_year_label(&self) -> String {
        month_year_label(self.selected_day(), self.locale)
    }

    pub fn is_selected(&self, day: NaiveDate) -> bool {
        self.selected_day() == day
    }

    fn sync_displayed_week(&mut self) -> WeekTransition {
        let week_start = week_start_of(self.selected_day(), self.locale.week_start());
        let transition = match week_start.cmp(&self.displayed_week_start) {
            std::cmp::Ordering::Equal => WeekTransition::Unchanged,
            std::cmp::Ordering::Greater => WeekTransition::Forward,
            std::cmp::Ordering::Less => WeekTransition::Backward,
        };
        self.displayed_week_start = week_start;
        transition
    }
}

/// First day of the week containing `day`.
pub fn week_start_of(day: NaiveDate, week_start: Weekday) -> NaiveDate {
    day.week(week_start).first_day()
}

/// Saturday or Sunday; the week strip tints these.
pub fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 7 consecutive days from `start`.
pub fn week_window(start: NaiveDate) -> [NaiveDate; 7] {
    let mut days = [start; 7];
    for (offset, slot) in days.iter_mut().enumerate() {
        *slot = start + Days::new(offset as u64);
    }
    days
}

/// Month name and year with only the first grapheme upper-cased.
pub fn month_year_label(day: NaiveDate, locale: CalendarLocale) -> String {
    let raw = format!("{} {}", locale.month_name(day.month()), day.year());
    capitalize_first(&raw)
}

/// Upper-cases the first grapheme cluster and leaves the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut graphemes = value.graphemes(true);
    match graphemes.next() {
        Some(first) => {
            let mut out = first.to_uppercase();
            out.push_str(graphemes.as_str());
            out
        }
        None => String::new(),
    }
}

fn shift_day<Tz: TimeZone>(date: &DateTime<Tz>, direction: DayDirection) -> DateTime<Tz> {
    let local = date.naive_local();
    let shifted = match direction {
        DayDirection::Forward => local.checked_add_days(Days::new(1)),
        DayDirection::Backward => local.checked_sub_days(Days::new(1)),
    };
    match shifted {
        Some(target) => resolve_local(&date.timezone(), target),
        // Past chrono's representable range; stay put.
        None => date.clone(),
    }
}

fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(resolved) => resolved,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let pushed = local + TimeDelta::hours(1);
            match tz.from_local_datetime(&pushed) {
                LocalResult::Single(resolved) | LocalResult::Ambiguous(resolved, _) => resolved,
                LocalResult::None => tz.from_utc_datetime(&local),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{capitalize_first, week_start_of};
    use chrono::{NaiveDate, Weekday};

    #[test]
    fn capitalize_first_handles_cyrillic_and_empty() {
        assert_eq!(capitalize_first("октябрь 2026"), "Октябрь 2026");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn capitalize_first_keeps_combining_marks_attached() {
        // "e" + combining acute accent is one grapheme.
        assert_eq!(capitalize_first("e\u{301}te"), "E\u{301}te");
    }

    #[test]
    fn week_start_on_the_start_day_is_that_day() {
        let monday = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        assert_eq!(week_start_of(monday, Weekday::Mon), monday);
    }
}
