//! Locale-bound lookups, number and date formatting, placeholder substitution.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::{Captures, Regex};

use super::format::{DateFormat, IntFormat, format_date, format_int};
use super::store::{LocaleStore, StoreValue};
use super::LocaleKey;
use crate::error::ResolveError;

// Capture group 1: placeholder name
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%\{([^}]+)\}").unwrap());

/// Replace every `%{name}` in `template` with the matching entry.
///
/// Placeholders without an entry are left verbatim.
pub fn substitute(template: &str, values: &HashMap<&str, String>) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Binds a locale to a store.
///
/// Cheap to copy; one is created per resolution pass.
#[derive(Debug, Clone, Copy)]
pub struct Localizer<'s> {
    locale: &'s str,
    store: &'s LocaleStore,
}

impl<'s> Localizer<'s> {
    pub fn new(locale: &'s str, store: &'s LocaleStore) -> Self {
        Self { locale, store }
    }

    pub fn locale(&self) -> &'s str {
        self.locale
    }

    pub fn store(&self) -> &'s LocaleStore {
        self.store
    }

    pub fn get(&self, key: &LocaleKey, index: Option<usize>) -> Option<StoreValue> {
        self.store.get(key.as_str(), self.locale, index)
    }

    /// Text at `key`, or `""` on a miss.
    pub fn string(&self, key: &LocaleKey, index: Option<usize>) -> String {
        self.get(key, index)
            .map(|value| value.to_text())
            .unwrap_or_default()
    }

    /// Elements at `key` as text. A scalar becomes a one-element list; with
    /// `index` only that element is returned.
    pub fn array(&self, key: &LocaleKey, index: Option<usize>) -> Vec<String> {
        self.get(key, index)
            .map(|value| value.elements().iter().map(StoreValue::to_text).collect())
            .unwrap_or_default()
    }

    pub fn int(&self, value: i64, format: IntFormat) -> String {
        format_int(value, format, self.locale)
    }

    /// Format the number stored at `key`. A miss renders as `""`.
    pub fn int_at(
        &self,
        key: &LocaleKey,
        index: Option<usize>,
        format: IntFormat,
    ) -> Result<String, ResolveError> {
        let Some(value) = self.get(key, index) else {
            return Ok(String::new());
        };
        let number = value
            .as_i64()
            .ok_or_else(|| ResolveError::UnknownLocalizationType {
                key: key.clone(),
                expected: "int",
                found: value.kind(),
            })?;
        Ok(self.int(number, format))
    }

    pub fn date(&self, value: &DateTime<Utc>, format: &DateFormat) -> Result<String, ResolveError> {
        format_date(value, format, self.locale)
    }

    /// Format the RFC 3339 timestamp stored at `key`. A miss renders as `""`.
    pub fn date_at(
        &self,
        key: &LocaleKey,
        index: Option<usize>,
        format: &DateFormat,
    ) -> Result<String, ResolveError> {
        let Some(value) = self.get(key, index) else {
            return Ok(String::new());
        };
        let mismatch = || ResolveError::UnknownLocalizationType {
            key: key.clone(),
            expected: "date",
            found: value.kind(),
        };
        let text = value.as_str().ok_or_else(mismatch)?;
        let instant = DateTime::parse_from_rfc3339(text)
            .map_err(|_| mismatch())?
            .with_timezone(&Utc);
        self.date(&instant, format)
    }
}
