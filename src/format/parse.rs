use chrono::{NaiveDate, NaiveDateTime};
use tracing::trace;

use super::model::{FormatSegment, FormatToken, TokenRole, Width};
use super::parser::parse_format;
use crate::locale::{LocaleService, MonthStyle};

#[derive(Debug, Default)]
struct Fields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hours: u32,
    minutes: u32,
    seconds: u32,
    pm: Option<bool>,
}

/// Reads `text` back into a date using `pattern`.
///
/// Returns `None` for anything that is not a real calendar date: missing
/// year/month/day, out-of-range fields, or impossible dates like Feb 30.
pub fn parse_value(
    text: &str,
    pattern: &str,
    locales: &dyn LocaleService,
    locale: &str,
) -> Option<NaiveDateTime> {
    parse_segments(text, &parse_format(pattern), locales, locale)
}

pub fn parse_segments(
    text: &str,
    segments: &[FormatSegment],
    locales: &dyn LocaleService,
    locale: &str,
) -> Option<NaiveDateTime> {
    let mut fields = Fields::default();
    let mut rest = text.trim();

    for (idx, segment) in segments.iter().enumerate() {
        match segment {
            FormatSegment::Literal(literal) => rest = skip_literal(rest, literal),
            FormatSegment::Token(token) => {
                let Some((piece, remaining)) = take_token(rest, *token, segments.get(idx + 1))
                else {
                    trace!(text, token = token.as_str(), "input ended before token");
                    return None;
                };
                if !apply_token(&mut fields, *token, piece, locales, locale) {
                    trace!(text, token = token.as_str(), piece, "token value rejected");
                    return None;
                }
                rest = remaining;
            }
        }
    }

    if !rest.trim().is_empty() {
        trace!(text, rest, "trailing input after pattern");
        return None;
    }

    build(fields).or_else(|| {
        trace!(text, "not a valid calendar date");
        None
    })
}

/// Exact match consumes the literal; a matching first character consumes
/// just that character; otherwise nothing is consumed.
fn skip_literal<'a>(rest: &'a str, literal: &str) -> &'a str {
    if let Some(stripped) = rest.strip_prefix(literal) {
        return stripped;
    }
    match (rest.chars().next(), literal.chars().next()) {
        (Some(actual), Some(expected)) if actual == expected => &rest[actual.len_utf8()..],
        _ => rest,
    }
}

fn split_chars(rest: &str, count: usize) -> (&str, &str) {
    let end = rest
        .char_indices()
        .nth(count)
        .map(|(pos, _)| pos)
        .unwrap_or(rest.len());
    rest.split_at(end)
}

fn take_token<'a>(
    rest: &'a str,
    token: FormatToken,
    next: Option<&FormatSegment>,
) -> Option<(&'a str, &'a str)> {
    match token.width() {
        Width::Fixed(len) => {
            let (piece, remaining) = split_chars(rest, len);
            (piece.chars().count() == len).then_some((piece, remaining))
        }
        Width::Digits => {
            let digits = rest.chars().take(2).take_while(char::is_ascii_digit).count();
            (digits > 0).then(|| rest.split_at(digits))
        }
        Width::Variable => {
            let end = match next {
                Some(FormatSegment::Literal(literal)) => rest.find(literal.as_str()).unwrap_or(rest.len()),
                _ => rest
                    .char_indices()
                    .find(|(_, ch)| !ch.is_alphabetic() && *ch != '.')
                    .map(|(pos, _)| pos)
                    .unwrap_or(rest.len()),
            };
            let (piece, remaining) = rest.split_at(end);
            (!piece.trim().is_empty()).then_some((piece.trim(), remaining))
        }
    }
}

fn number(piece: &str) -> Option<u32> {
    if piece.is_empty() || !piece.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    piece.parse().ok()
}

fn month_from_name(
    piece: &str,
    token: FormatToken,
    locales: &dyn LocaleService,
    locale: &str,
) -> Option<u32> {
    let (primary, secondary) = if token == FormatToken::MonthLong {
        (MonthStyle::Long, MonthStyle::Short)
    } else {
        (MonthStyle::Short, MonthStyle::Long)
    };
    let wanted = piece.to_lowercase();
    [primary, secondary].into_iter().find_map(|style| {
        locales
            .month_names(locale, style)
            .iter()
            .position(|name| name.to_lowercase() == wanted)
            .map(|idx| idx as u32 + 1)
    })
}

fn apply_token(
    fields: &mut Fields,
    token: FormatToken,
    piece: &str,
    locales: &dyn LocaleService,
    locale: &str,
) -> bool {
    match token.role() {
        TokenRole::Year => {
            let Some(value) = number(piece) else {
                return false;
            };
            fields.year = Some(if token == FormatToken::YearShort {
                if value < 50 { 2000 + value as i32 } else { 1900 + value as i32 }
            } else {
                value as i32
            });
        }
        TokenRole::Month => {
            fields.month = match token.width() {
                Width::Variable => month_from_name(piece, token, locales, locale),
                _ => number(piece),
            };
            if fields.month.is_none() {
                return false;
            }
        }
        TokenRole::Day => {
            fields.day = number(piece);
            if fields.day.is_none() {
                return false;
            }
        }
        // Weekday names carry no information the date does not already hold.
        TokenRole::Weekday => {}
        TokenRole::Hour => match number(piece) {
            Some(value) if token.is_twelve_hour() && value > 12 => return false,
            Some(value) => fields.hours = value,
            None => return false,
        },
        TokenRole::Minute => match number(piece) {
            Some(value) => fields.minutes = value,
            None => return false,
        },
        TokenRole::Second => match number(piece) {
            Some(value) => fields.seconds = value,
            None => return false,
        },
        TokenRole::Meridiem => {
            fields.pm = if piece.eq_ignore_ascii_case("PM") {
                Some(true)
            } else if piece.eq_ignore_ascii_case("AM") {
                Some(false)
            } else {
                return false;
            };
        }
    }
    true
}

fn build(fields: Fields) -> Option<NaiveDateTime> {
    let mut hours = fields.hours;
    match fields.pm {
        Some(true) if hours < 12 => hours += 12,
        Some(false) if hours == 12 => hours = 0,
        _ => {}
    }

    let (year, month, day) = (fields.year?, fields.month?, fields.day?);
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    // from_ymd_opt refuses to roll Feb 30 into March, so a successful
    // construction always reads back as the parsed year/month/day.
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    date.and_hms_opt(hours, fields.minutes, fields.seconds)
}
