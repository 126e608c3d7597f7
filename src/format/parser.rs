use super::model::{FormatSegment, FormatToken};

/// Splits a pattern such as `dddd, MMMM DD, YYYY` into tokens and literals.
///
/// At each position the longest known token wins; anything else joins the
/// preceding literal. Concatenating [`FormatSegment::source`] of the result
/// reproduces `pattern` exactly.
pub fn parse_format(pattern: &str) -> Vec<FormatSegment> {
    let mut segments = Vec::<FormatSegment>::new();
    let mut rest = pattern;

    while let Some(ch) = rest.chars().next() {
        if let Some(token) = FormatToken::ALL
            .iter()
            .copied()
            .find(|token| rest.starts_with(token.as_str()))
        {
            segments.push(FormatSegment::Token(token));
            rest = &rest[token.as_str().len()..];
            continue;
        }

        match segments.last_mut() {
            Some(FormatSegment::Literal(text)) => text.push(ch),
            _ => segments.push(FormatSegment::Literal(ch.to_string())),
        }
        rest = &rest[ch.len_utf8()..];
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use FormatSegment::{Literal, Token};

    fn lit(text: &str) -> FormatSegment {
        Literal(text.to_string())
    }

    #[test]
    fn numeric_date_pattern() {
        assert_eq!(
            parse_format("MM/DD/YYYY"),
            vec![
                Token(FormatToken::MonthPadded),
                lit("/"),
                Token(FormatToken::DayPadded),
                lit("/"),
                Token(FormatToken::YearFull),
            ]
        );
    }

    #[test]
    fn longest_token_wins() {
        assert_eq!(
            parse_format("dddd, MMMM D, YY"),
            vec![
                Token(FormatToken::WeekdayLong),
                lit(", "),
                Token(FormatToken::MonthLong),
                lit(" "),
                Token(FormatToken::Day),
                lit(", "),
                Token(FormatToken::YearShort),
            ]
        );
        assert_eq!(
            parse_format("MMMMM"),
            vec![Token(FormatToken::MonthLong), Token(FormatToken::Month)]
        );
    }

    #[test]
    fn unknown_letters_merge_into_literals() {
        assert_eq!(
            parse_format("YYYY-MM-DDTHH:mm"),
            vec![
                Token(FormatToken::YearFull),
                lit("-"),
                Token(FormatToken::MonthPadded),
                lit("-"),
                Token(FormatToken::DayPadded),
                lit("T"),
                Token(FormatToken::Hour24Padded),
                lit(":"),
                Token(FormatToken::MinutePadded),
            ]
        );
        assert_eq!(parse_format("Week of"), vec![lit("Week of")]);
        assert_eq!(parse_format("dd.YYY"), vec![lit("dd."), Token(FormatToken::YearShort), lit("Y")]);
    }

    #[test]
    fn twelve_hour_with_meridiem() {
        assert_eq!(
            parse_format("hh:mm a"),
            vec![
                Token(FormatToken::Hour12Padded),
                lit(":"),
                Token(FormatToken::MinutePadded),
                lit(" "),
                Token(FormatToken::MeridiemLower),
            ]
        );
    }

    #[test]
    fn segments_rebuild_pattern() {
        for pattern in [
            "MM/DD/YYYY",
            "dddd, MMMM DD, YYYY",
            "h:mm:ss A",
            "Q? YYYY年MM月DD日",
            "",
            "[at] HH",
        ] {
            let rebuilt: String = parse_format(pattern)
                .iter()
                .map(FormatSegment::source)
                .collect();
            assert_eq!(rebuilt, pattern);
        }
    }
}
