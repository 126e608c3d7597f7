//! Locale lookups consumed by the formatter and the picker.

mod table;

use chrono::Weekday;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::date::weekday_from_index;
use crate::error::ConfigError;

pub use table::LocaleTable;

pub const DEFAULT_LOCALE: &str = "en-US";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStyle {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStyle {
    Long,
    Short,
    Narrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

pub trait LocaleService {
    /// Twelve names, January first.
    fn month_names(&self, locale: &str, style: MonthStyle) -> &[String];
    /// Seven names, Sunday first.
    fn day_names(&self, locale: &str, style: DayStyle) -> &[String];
    fn first_day_of_week(&self, locale: &str) -> Weekday;
    fn text_direction(&self, locale: &str) -> TextDirection;
}

/// Locale tables keyed by BCP-47 style tag.
///
/// Lookups try the exact tag, then its language prefix (`fr-CA` -> `fr`),
/// then the default table.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    tables: IndexMap<String, LocaleTable>,
    default: LocaleTable,
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        let mut tables = IndexMap::new();
        tables.insert(DEFAULT_LOCALE.to_string(), LocaleTable::english());
        Self {
            tables,
            default: LocaleTable::english(),
        }
    }
}

impl LocaleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, tag: impl Into<String>, table: LocaleTable) -> Self {
        self.insert(tag, table);
        self
    }

    pub fn insert(&mut self, tag: impl Into<String>, table: LocaleTable) {
        self.tables.insert(tag.into(), table);
    }

    /// Loads a YAML mapping of tag -> table and adds every entry.
    pub fn load_yaml(&mut self, source: &str) -> Result<usize, ConfigError> {
        let tables: IndexMap<String, LocaleTable> = serde_yaml::from_str(source)?;
        for (tag, table) in &tables {
            table
                .validate()
                .map_err(|message| ConfigError::invalid("locale", format!("{tag}: {message}")))?;
        }
        let count = tables.len();
        self.tables.extend(tables);
        Ok(count)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn resolve(&self, locale: &str) -> &LocaleTable {
        if let Some(table) = self.tables.get(locale) {
            return table;
        }
        if let Some((language, _)) = locale.split_once(['-', '_'])
            && let Some(table) = self.tables.get(language)
        {
            return table;
        }
        debug!(locale, fallback = DEFAULT_LOCALE, "unknown locale, using default tables");
        &self.default
    }
}

impl LocaleService for LocaleRegistry {
    fn month_names(&self, locale: &str, style: MonthStyle) -> &[String] {
        let table = self.resolve(locale);
        match style {
            MonthStyle::Long => &table.months_long,
            MonthStyle::Short => &table.months_short,
        }
    }

    fn day_names(&self, locale: &str, style: DayStyle) -> &[String] {
        let table = self.resolve(locale);
        match style {
            DayStyle::Long => &table.days_long,
            DayStyle::Short => &table.days_short,
            DayStyle::Narrow => &table.days_narrow,
        }
    }

    fn first_day_of_week(&self, locale: &str) -> Weekday {
        weekday_from_index(self.resolve(locale).first_day_of_week).unwrap_or(Weekday::Sun)
    }

    fn text_direction(&self, locale: &str) -> TextDirection {
        self.resolve(locale).direction
    }
}
