use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Europe::Berlin;
use chrono_tz::Pacific::Apia;
use tiecal_core::calendar::navigation::{capitalize_first, is_weekend, week_start_of};
use tiecal_core::{CalendarLocale, DateNavigator, DayDirection, WeekTransition};

fn moscow() -> FixedOffset {
    FixedOffset::east_opt(3 * 3600).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
    moscow().with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn week_window_is_seven_consecutive_days_containing_the_selection() {
    let mut start = day(2024, 1, 1);
    let end = day(2025, 12, 31);
    while start <= end {
        for locale in [CalendarLocale::Ru, CalendarLocale::En] {
            let selected = moscow()
                .from_local_datetime(&start.and_hms_opt(8, 0, 0).unwrap())
                .unwrap();
            let nav = DateNavigator::new(selected, locale);
            let window = nav.current_week_window();

            assert!(window.contains(&start), "{start} not in its window");
            assert_eq!(window[0].weekday(), locale.week_start());
            for pair in window.windows(2) {
                assert_eq!(pair[0] + Days::new(1), pair[1]);
            }
        }
        start = start + Days::new(1);
    }
}

#[test]
fn russian_weeks_start_on_monday_and_english_on_sunday() {
    // 2026-10-18 is a Sunday.
    let sunday = at(2026, 10, 18, 10);
    let ru = DateNavigator::new(sunday, CalendarLocale::Ru);
    let en = DateNavigator::new(sunday, CalendarLocale::En);

    assert_eq!(ru.current_week_window()[0], day(2026, 10, 12));
    assert_eq!(ru.current_week_window()[6], day(2026, 10, 18));
    assert_eq!(en.current_week_window()[0], day(2026, 10, 18));
    assert_eq!(en.current_week_window()[6], day(2026, 10, 24));
}

#[test]
fn advance_day_rolls_over_month_and_year_and_keeps_time_of_day() {
    let mut nav = DateNavigator::new(at(2025, 12, 31, 23), CalendarLocale::Ru);
    nav.advance_day(DayDirection::Forward);

    assert_eq!(nav.selected_day(), day(2026, 1, 1));
    assert_eq!(
        nav.selected_date().naive_local().time(),
        at(2025, 12, 31, 23).naive_local().time()
    );
    assert_eq!(nav.month_year_label(), "Январь 2026");

    nav.advance_day(DayDirection::Backward);
    assert_eq!(nav.month_year_label(), "Декабрь 2025");
}

#[test]
fn leap_day_is_visited() {
    let mut nav = DateNavigator::new(at(2024, 2, 28, 12), CalendarLocale::Ru);
    nav.advance_day(DayDirection::Forward);
    assert_eq!(nav.selected_day(), day(2024, 2, 29));
    nav.advance_day(DayDirection::Forward);
    assert_eq!(nav.selected_day(), day(2024, 3, 1));
}

#[test]
fn forward_then_backward_round_trips_on_a_fixed_offset() {
    let samples = [
        at(2025, 12, 31, 23),
        at(2024, 2, 29, 0),
        Utc::now().with_timezone(&moscow()),
    ];
    for original in samples {
        let mut nav = DateNavigator::new(original, CalendarLocale::Ru);
        nav.advance_day(DayDirection::Forward);
        nav.advance_day(DayDirection::Backward);
        assert_eq!(*nav.selected_date(), original);
    }
}

#[test]
fn week_transition_reports_direction() {
    // Sunday -> Monday crosses a Russian week boundary.
    let mut nav = DateNavigator::new(at(2026, 10, 18, 9), CalendarLocale::Ru);
    assert_eq!(nav.advance_day(DayDirection::Forward), WeekTransition::Forward);
    assert_eq!(nav.displayed_week_start(), day(2026, 10, 19));
    assert_eq!(nav.advance_day(DayDirection::Forward), WeekTransition::Unchanged);
    assert_eq!(nav.advance_day(DayDirection::Backward), WeekTransition::Unchanged);
    assert_eq!(nav.advance_day(DayDirection::Backward), WeekTransition::Backward);
    assert_eq!(nav.displayed_week_start(), day(2026, 10, 12));
}

#[test]
fn jumping_far_recomputes_the_window_from_the_new_date() {
    let mut nav = DateNavigator::new(at(2026, 10, 18, 9), CalendarLocale::Ru);
    let transition = nav.set_selected_date(at(1999, 7, 14, 9));

    assert_eq!(transition, WeekTransition::Backward);
    assert_eq!(
        nav.displayed_week_start(),
        week_start_of(day(1999, 7, 14), Weekday::Mon)
    );
    assert!(nav.current_week_window().contains(&day(1999, 7, 14)));
}

#[test]
fn select_day_keeps_time_and_marks_selection() {
    let mut nav = DateNavigator::new(at(2026, 10, 14, 9), CalendarLocale::Ru);
    let window = nav.current_week_window();

    assert_eq!(nav.select_day(window[6]), WeekTransition::Unchanged);
    assert!(nav.is_selected(window[6]));
    assert!(!nav.is_selected(window[0]));
    assert_eq!(
        nav.selected_date().naive_local().time(),
        at(2026, 10, 14, 9).naive_local().time()
    );
}

#[test]
fn weekends_are_saturday_and_sunday() {
    assert!(is_weekend(day(2026, 10, 17)));
    assert!(is_weekend(day(2026, 10, 18)));
    assert!(!is_weekend(day(2026, 10, 19)));
}

#[test]
fn month_labels_capitalize_only_the_first_letter() {
    let ru = DateNavigator::new(at(2026, 10, 18, 9), CalendarLocale::Ru);
    assert_eq!(ru.month_year_label(), "Октябрь 2026");
    let en = DateNavigator::new(at(2026, 5, 1, 9), CalendarLocale::En);
    assert_eq!(en.month_year_label(), "May 2026");
    assert_eq!(capitalize_first("сентябрь 2026"), "Сентябрь 2026");
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

#[test]
fn flipping_into_a_spring_gap_moves_one_hour_later() {
    // Berlin skips 02:00-03:00 on 2026-03-29.
    let start = Berlin.with_ymd_and_hms(2026, 3, 28, 2, 30, 0).unwrap();
    let mut nav = DateNavigator::new(start, CalendarLocale::Ru);

    nav.advance_day(DayDirection::Forward);
    let landed = nav.selected_date().clone();
    assert_eq!(nav.selected_day(), day(2026, 3, 29));
    assert_eq!(landed.naive_local(), day(2026, 3, 29).and_hms_opt(3, 30, 0).unwrap());
    assert_eq!(landed.with_timezone(&Utc), utc(2026, 3, 29, 1, 30));

    // The shift is not undone on the way back.
    nav.advance_day(DayDirection::Backward);
    assert_ne!(*nav.selected_date(), start);
    assert_eq!(
        nav.selected_date().naive_local(),
        day(2026, 3, 28).and_hms_opt(3, 30, 0).unwrap()
    );
}

#[test]
fn flipping_into_an_autumn_fold_takes_the_earlier_instant() {
    // Berlin repeats 02:00-03:00 on 2026-10-25.
    let start = Berlin.with_ymd_and_hms(2026, 10, 24, 2, 30, 0).unwrap();
    let mut nav = DateNavigator::new(start, CalendarLocale::Ru);

    nav.advance_day(DayDirection::Forward);
    let landed = nav.selected_date().clone();
    assert_eq!(landed.naive_local(), day(2026, 10, 25).and_hms_opt(2, 30, 0).unwrap());
    // 02:30 CEST, not 02:30 CET.
    assert_eq!(landed.with_timezone(&Utc), utc(2026, 10, 25, 0, 30));

    nav.advance_day(DayDirection::Backward);
    assert_eq!(*nav.selected_date(), start);
}

#[test]
fn flipping_into_a_skipped_day_falls_back_to_utc() {
    // Samoa jumped from 2011-12-29 straight to 2011-12-31.
    let start = Apia.with_ymd_and_hms(2011, 12, 29, 12, 0, 0).unwrap();
    let mut nav = DateNavigator::new(start, CalendarLocale::En);

    nav.advance_day(DayDirection::Forward);
    assert_eq!(nav.selected_date().with_timezone(&Utc), utc(2011, 12, 30, 12, 0));
    assert_eq!(nav.selected_day(), day(2011, 12, 31));
}
