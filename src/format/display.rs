use chrono::{Datelike, NaiveDateTime, Timelike};

use super::model::{FormatSegment, FormatToken};
use super::parser::parse_format;
use crate::locale::{DayStyle, LocaleService, MonthStyle};

/// Renders `value` with `pattern`. Only the name tokens consult the locale.
pub fn format_value(
    value: &NaiveDateTime,
    pattern: &str,
    locales: &dyn LocaleService,
    locale: &str,
) -> String {
    format_segments(value, &parse_format(pattern), locales, locale)
}

pub fn format_segments(
    value: &NaiveDateTime,
    segments: &[FormatSegment],
    locales: &dyn LocaleService,
    locale: &str,
) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            FormatSegment::Literal(text) => out.push_str(text),
            FormatSegment::Token(token) => out.push_str(&format_token(*token, value, locales, locale)),
        }
    }
    out
}

fn name_at(names: &[String], idx: usize) -> String {
    names.get(idx).cloned().unwrap_or_default()
}

fn format_token(
    token: FormatToken,
    value: &NaiveDateTime,
    locales: &dyn LocaleService,
    locale: &str,
) -> String {
    let hour12 = match value.hour() % 12 {
        0 => 12,
        hour => hour,
    };
    let weekday = value.weekday().num_days_from_sunday() as usize;

    match token {
        FormatToken::YearFull => format!("{:04}", value.year()),
        FormatToken::YearShort => format!("{:02}", value.year().rem_euclid(100)),
        FormatToken::MonthLong => name_at(locales.month_names(locale, MonthStyle::Long), value.month0() as usize),
        FormatToken::MonthShort => name_at(locales.month_names(locale, MonthStyle::Short), value.month0() as usize),
        FormatToken::MonthPadded => format!("{:02}", value.month()),
        FormatToken::Month => value.month().to_string(),
        FormatToken::DayPadded => format!("{:02}", value.day()),
        FormatToken::Day => value.day().to_string(),
        FormatToken::WeekdayLong => name_at(locales.day_names(locale, DayStyle::Long), weekday),
        FormatToken::WeekdayShort => name_at(locales.day_names(locale, DayStyle::Short), weekday),
        FormatToken::Hour24Padded => format!("{:02}", value.hour()),
        FormatToken::Hour24 => value.hour().to_string(),
        FormatToken::Hour12Padded => format!("{hour12:02}"),
        FormatToken::Hour12 => hour12.to_string(),
        FormatToken::MinutePadded => format!("{:02}", value.minute()),
        FormatToken::SecondPadded => format!("{:02}", value.second()),
        FormatToken::MeridiemUpper => meridiem(value.hour()).to_string(),
        FormatToken::MeridiemLower => meridiem(value.hour()).to_ascii_lowercase(),
    }
}

fn meridiem(hour: u32) -> &'static str {
    if hour < 12 { "AM" } else { "PM" }
}

/// Placeholder mask for an empty input, e.g. `mm/dd/yyyy` for `MM/DD/YYYY`.
pub fn generate_mask(segments: &[FormatSegment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            FormatSegment::Literal(text) => text.as_str(),
            FormatSegment::Token(token) => token.placeholder(),
        })
        .collect()
}
