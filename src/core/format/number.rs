use serde::{Deserialize, Serialize};

use crate::core::store::{base_language, normalize_locale};

/// Integer formatting fixed when a pending integer is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntFormat {
    /// Whether to insert the locale's grouping separator.
    pub grouping: bool,
    /// Digits per group. `0` disables grouping.
    pub group_size: usize,
}

impl IntFormat {
    pub const fn grouped(group_size: usize) -> Self {
        Self {
            grouping: true,
            group_size,
        }
    }

    pub const fn plain() -> Self {
        Self {
            grouping: false,
            group_size: 3,
        }
    }
}

impl Default for IntFormat {
    fn default() -> Self {
        Self::grouped(3)
    }
}

/// Grouping separator glyph used by `locale`.
pub fn grouping_separator(locale: &str) -> &'static str {
    match normalize_locale(locale).as_str() {
        "de-ch" | "it-ch" | "fr-ch" => return "\u{2019}",
        "es-mx" | "es-us" => return ",",
        _ => {}
    }
    match base_language(locale).as_str() {
        "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" | "el" => ".",
        "fr" | "nb" | "no" | "sv" | "fi" | "pl" | "cs" | "sk" | "ru" | "uk" | "hu" => "\u{202f}",
        _ => ",",
    }
}

/// Render `value` with no fractional part, grouping per `format` and `locale`.
pub fn format_int(value: i64, format: IntFormat, locale: &str) -> String {
    let digits = value.unsigned_abs().to_string();
    let sign = if value < 0 { "-" } else { "" };

    if !format.grouping || format.group_size == 0 || digits.len() <= format.group_size {
        return format!("{sign}{digits}");
    }

    let separator = grouping_separator(locale);
    let size = format.group_size;
    let first = match digits.len() % size {
        0 => size,
        n => n,
    };

    let mut result = String::with_capacity(digits.len() + digits.len() / size * 3 + 1);
    result.push_str(sign);
    result.push_str(&digits[..first]);
    let mut rest = &digits[first..];
    while !rest.is_empty() {
        result.push_str(separator);
        result.push_str(&rest[..size]);
        rest = &rest[size..];
    }
    result
}
