use super::model::{FormatSegment, FormatToken, Width};
use super::parser::parse_format;

/// Re-masks raw keystrokes: keeps only the digits and pours them into the
/// pattern's numeric slots, emitting each separator once a digit follows it.
///
/// Typing stops at the first name or AM/PM token; those are only reachable
/// through [`parse_value`](super::parse_value).
///
/// Unpadded `M`, `D`, `H` and `h` still take two digits each, so `6152024`
/// under `M/D/YYYY` masks to `61/52/024`. Users have to type `06152024`;
/// prefer padded tokens for fields that are typed through the mask.
pub fn apply_typing_mask(raw: &str, pattern: &str) -> String {
    apply_mask_segments(raw, &parse_format(pattern))
}

pub fn apply_mask_segments(raw: &str, segments: &[FormatSegment]) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    let mut remaining = digits.as_slice();
    let mut out = String::with_capacity(raw.len());

    for (idx, segment) in segments.iter().enumerate() {
        if remaining.is_empty() {
            break;
        }
        match segment {
            FormatSegment::Literal(text) => {
                // A separator is only worth showing if a typeable slot follows.
                let next_slot = segments[idx + 1..].iter().find_map(|segment| match segment {
                    FormatSegment::Token(token) => Some(slot_len(*token)),
                    FormatSegment::Literal(_) => None,
                });
                if !matches!(next_slot, Some(Some(_))) {
                    break;
                }
                out.push_str(text);
            }
            FormatSegment::Token(token) => {
                let Some(slot) = slot_len(*token) else {
                    break;
                };
                let (taken, rest) = remaining.split_at(slot.min(remaining.len()));
                out.extend(taken);
                remaining = rest;
            }
        }
    }

    out
}

fn slot_len(token: FormatToken) -> Option<usize> {
    match token.width() {
        Width::Fixed(len) if token.is_numeric() => Some(len),
        Width::Digits => Some(2),
        _ => None,
    }
}

/// Number of digits the pattern's mask-typeable slots can hold.
pub fn mask_capacity(segments: &[FormatSegment]) -> usize {
    segments
        .iter()
        .filter_map(|segment| match segment {
            FormatSegment::Token(token) => Some(slot_len(*token)),
            FormatSegment::Literal(_) => None,
        })
        .map_while(|slot| slot)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_progressively_fills_slots() {
        let typed = "06152024";
        let expected = [
            "0",
            "06",
            "06/1",
            "06/15",
            "06/15/2",
            "06/15/20",
            "06/15/202",
            "06/15/2024",
        ];
        for (len, want) in (1..=typed.len()).zip(expected) {
            assert_eq!(apply_typing_mask(&typed[..len], "MM/DD/YYYY"), want);
        }
    }

    #[test]
    fn strips_non_digits_and_extra_input() {
        assert_eq!(apply_typing_mask("06-15-2024", "MM/DD/YYYY"), "06/15/2024");
        assert_eq!(apply_typing_mask("ab06/15/20249999", "MM/DD/YYYY"), "06/15/2024");
        assert_eq!(apply_typing_mask("", "MM/DD/YYYY"), "");
        assert_eq!(apply_typing_mask("abc", "MM/DD/YYYY"), "");
    }

    #[test]
    fn leading_literal_waits_for_first_digit() {
        assert_eq!(apply_typing_mask("", "(YYYY)"), "");
        assert_eq!(apply_typing_mask("20", "(YYYY)"), "(20");
        assert_eq!(apply_typing_mask("2024", "(YYYY)"), "(2024");
    }

    #[test]
    fn stops_at_name_and_meridiem_tokens() {
        assert_eq!(apply_typing_mask("15062024", "DD MMMM YYYY"), "15");
        assert_eq!(apply_typing_mask("0930", "hh:mm A"), "09:30");
        assert_eq!(apply_typing_mask("093011", "hh:mm A"), "09:30");
    }

    #[test]
    fn unpadded_tokens_take_two_digit_slots() {
        assert_eq!(apply_typing_mask("06152024", "M/D/YYYY"), "06/15/2024");
        assert_eq!(apply_typing_mask("6152024", "M/D/YYYY"), "61/52/024");
        assert_eq!(mask_capacity(&parse_format("M/D/YYYY")), 8);
    }

    #[test]
    fn datetime_pattern() {
        assert_eq!(
            apply_typing_mask("202406151430", "YYYY-MM-DD HH:mm"),
            "2024-06-15 14:30"
        );
    }

    #[test]
    fn mask_is_idempotent() {
        let patterns = [
            "MM/DD/YYYY",
            "YYYY-MM-DD HH:mm:ss",
            "DD.MM.YY",
            "hh:mm A",
            "M/D/YYYY",
            "DD MMMM YYYY",
        ];
        let inputs = ["", "1", "12", "123", "12/3", "1x2y3z4", "20240615143000", "99999999999999999"];
        for pattern in patterns {
            for input in inputs {
                let once = apply_typing_mask(input, pattern);
                assert_eq!(apply_typing_mask(&once, pattern), once, "{pattern} / {input}");
            }
        }
    }

    #[test]
    fn capacity_counts_typeable_digits() {
        assert_eq!(mask_capacity(&parse_format("MM/DD/YYYY")), 8);
        assert_eq!(mask_capacity(&parse_format("hh:mm A")), 4);
        assert_eq!(mask_capacity(&parse_format("DD MMMM YYYY")), 2);
    }
}
