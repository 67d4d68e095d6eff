//! Calendar locale data: week start and standalone month names.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

const RU_MONTHS: [&str; 12] = [
    "январь",
    "февраль",
    "март",
    "апрель",
    "май",
    "июнь",
    "июль",
    "август",
    "сентябрь",
    "октябрь",
    "ноябрь",
    "декабрь",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Supported calendar locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarLocale {
    #[default]
    Ru,
    En,
}

impl CalendarLocale {
    /// Parses `ru`, `ru_RU`, `ru-RU`, `en_US`, ... by language subtag.
    ///
    /// Unrecognized languages map to the default locale.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .trim()
            .split(['_', '-', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Self::En,
            _ => Self::Ru,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Ru => "ru_RU",
            Self::En => "en_US",
        }
    }

    /// First day of the calendar week.
    pub fn week_start(self) -> Weekday {
        match self {
            Self::Ru => Weekday::Mon,
            Self::En => Weekday::Sun,
        }
    }

    /// Full standalone month name as the locale formats it, `month` in 1..=12.
    ///
    /// Russian standalone names come out lower-case.
    pub fn month_name(self, month: u32) -> &'static str {
        let index = (month.clamp(1, 12) - 1) as usize;
        match self {
            Self::Ru => RU_MONTHS[index],
            Self::En => EN_MONTHS[index],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CalendarLocale;
    use chrono::Weekday;

    #[test]
    fn tags_resolve_by_language() {
        assert_eq!(CalendarLocale::from_tag("ru_RU"), CalendarLocale::Ru);
        assert_eq!(CalendarLocale::from_tag("EN-gb"), CalendarLocale::En);
        assert_eq!(CalendarLocale::from_tag("de_DE"), CalendarLocale::Ru);
        assert_eq!(CalendarLocale::from_tag(""), CalendarLocale::Ru);
    }

    #[test]
    fn week_start_follows_locale() {
        assert_eq!(CalendarLocale::Ru.week_start(), Weekday::Mon);
        assert_eq!(CalendarLocale::En.week_start(), Weekday::Sun);
    }
}
