use serde::{Deserialize, Serialize};

use super::TextDirection;

/// Month/day name tables for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleTable {
    pub months_long: Vec<String>,
    pub months_short: Vec<String>,
    /// Index 0 = Sunday.
    pub days_long: Vec<String>,
    pub days_short: Vec<String>,
    pub days_narrow: Vec<String>,
    /// 0 = Sunday, 1 = Monday, 6 = Saturday.
    #[serde(default)]
    pub first_day_of_week: u8,
    #[serde(default)]
    pub direction: TextDirection,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl LocaleTable {
    pub fn english() -> Self {
        Self {
            months_long: owned(&[
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
            ]),
            months_short: owned(&[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            days_long: owned(&[
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            days_short: owned(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            days_narrow: owned(&["S", "M", "T", "W", "T", "F", "S"]),
            first_day_of_week: 0,
            direction: TextDirection::Ltr,
        }
    }

    /// Checks table shapes: 12 months, 7 days, first day 0-6.
    pub fn validate(&self) -> Result<(), String> {
        for (name, list, expected) in [
            ("months_long", &self.months_long, 12),
            ("months_short", &self.months_short, 12),
            ("days_long", &self.days_long, 7),
            ("days_short", &self.days_short, 7),
            ("days_narrow", &self.days_narrow, 7),
        ] {
            if list.len() != expected {
                return Err(format!(
                    "{name} has {} entries, expected {expected}",
                    list.len()
                ));
            }
        }
        if self.first_day_of_week > 6 {
            return Err(format!(
                "first_day_of_week {} is not 0-6",
                self.first_day_of_week
            ));
        }
        Ok(())
    }
}
