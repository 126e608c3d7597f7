#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRole {
    Year,
    Month,
    Day,
    Weekday,
    Hour,
    Minute,
    Second,
    Meridiem,
}

/// How many characters a token occupies in formatted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Exactly this many characters (zero-padded numbers, AM/PM).
    Fixed(usize),
    /// Unpadded number, one or two digits.
    Digits,
    /// Locale name of unknown length.
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatToken {
    YearFull,
    YearShort,
    MonthLong,
    MonthShort,
    MonthPadded,
    Month,
    DayPadded,
    Day,
    WeekdayLong,
    WeekdayShort,
    Hour24Padded,
    Hour24,
    Hour12Padded,
    Hour12,
    MinutePadded,
    SecondPadded,
    MeridiemUpper,
    MeridiemLower,
}

impl FormatToken {
    /// Every token in longest-match-first order.
    pub const ALL: [FormatToken; 18] = [
        FormatToken::YearFull,
        FormatToken::MonthLong,
        FormatToken::WeekdayLong,
        FormatToken::MonthShort,
        FormatToken::WeekdayShort,
        FormatToken::YearShort,
        FormatToken::MonthPadded,
        FormatToken::DayPadded,
        FormatToken::Hour24Padded,
        FormatToken::Hour12Padded,
        FormatToken::MinutePadded,
        FormatToken::SecondPadded,
        FormatToken::Month,
        FormatToken::Day,
        FormatToken::Hour24,
        FormatToken::Hour12,
        FormatToken::MeridiemUpper,
        FormatToken::MeridiemLower,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormatToken::YearFull => "YYYY",
            FormatToken::YearShort => "YY",
            FormatToken::MonthLong => "MMMM",
            FormatToken::MonthShort => "MMM",
            FormatToken::MonthPadded => "MM",
            FormatToken::Month => "M",
            FormatToken::DayPadded => "DD",
            FormatToken::Day => "D",
            FormatToken::WeekdayLong => "dddd",
            FormatToken::WeekdayShort => "ddd",
            FormatToken::Hour24Padded => "HH",
            FormatToken::Hour24 => "H",
            FormatToken::Hour12Padded => "hh",
            FormatToken::Hour12 => "h",
            FormatToken::MinutePadded => "mm",
            FormatToken::SecondPadded => "ss",
            FormatToken::MeridiemUpper => "A",
            FormatToken::MeridiemLower => "a",
        }
    }

    pub fn width(self) -> Width {
        match self {
            FormatToken::YearFull => Width::Fixed(4),
            FormatToken::YearShort
            | FormatToken::MonthPadded
            | FormatToken::DayPadded
            | FormatToken::Hour24Padded
            | FormatToken::Hour12Padded
            | FormatToken::MinutePadded
            | FormatToken::SecondPadded
            | FormatToken::MeridiemUpper
            | FormatToken::MeridiemLower => Width::Fixed(2),
            FormatToken::Month | FormatToken::Day | FormatToken::Hour24 | FormatToken::Hour12 => {
                Width::Digits
            }
            FormatToken::MonthLong
            | FormatToken::MonthShort
            | FormatToken::WeekdayLong
            | FormatToken::WeekdayShort => Width::Variable,
        }
    }

    pub fn role(self) -> TokenRole {
        match self {
            FormatToken::YearFull | FormatToken::YearShort => TokenRole::Year,
            FormatToken::MonthLong
            | FormatToken::MonthShort
            | FormatToken::MonthPadded
            | FormatToken::Month => TokenRole::Month,
            FormatToken::DayPadded | FormatToken::Day => TokenRole::Day,
            FormatToken::WeekdayLong | FormatToken::WeekdayShort => TokenRole::Weekday,
            FormatToken::Hour24Padded
            | FormatToken::Hour24
            | FormatToken::Hour12Padded
            | FormatToken::Hour12 => TokenRole::Hour,
            FormatToken::MinutePadded => TokenRole::Minute,
            FormatToken::SecondPadded => TokenRole::Second,
            FormatToken::MeridiemUpper | FormatToken::MeridiemLower => TokenRole::Meridiem,
        }
    }

    /// Numeric tokens the typing mask can fill with digits.
    pub fn is_numeric(self) -> bool {
        match self.width() {
            Width::Digits => true,
            Width::Fixed(_) => self.role() != TokenRole::Meridiem,
            Width::Variable => false,
        }
    }

    pub fn is_twelve_hour(self) -> bool {
        matches!(self, FormatToken::Hour12Padded | FormatToken::Hour12)
    }

    /// Placeholder shown by the display mask.
    pub fn placeholder(self) -> &'static str {
        match self {
            FormatToken::YearFull => "yyyy",
            FormatToken::YearShort => "yy",
            FormatToken::MonthPadded => "mm",
            FormatToken::Month => "m",
            FormatToken::DayPadded => "dd",
            FormatToken::Day => "d",
            FormatToken::Hour24Padded | FormatToken::Hour12Padded => "hh",
            FormatToken::Hour24 | FormatToken::Hour12 => "h",
            FormatToken::MinutePadded => "mm",
            FormatToken::SecondPadded => "ss",
            FormatToken::MeridiemUpper | FormatToken::MeridiemLower => "aa",
            FormatToken::MonthLong
            | FormatToken::MonthShort
            | FormatToken::WeekdayLong
            | FormatToken::WeekdayShort => self.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSegment {
    Literal(String),
    Token(FormatToken),
}

impl FormatSegment {
    /// Pattern text this segment was parsed from.
    pub fn source(&self) -> &str {
        match self {
            FormatSegment::Literal(text) => text.as_str(),
            FormatSegment::Token(token) => token.as_str(),
        }
    }
}
