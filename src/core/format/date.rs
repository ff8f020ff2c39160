use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::store::{base_language, normalize_locale};
use crate::error::ResolveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    Short,
    Medium,
    Long,
    Full,
}

/// Date formatting fixed when a pending date is constructed.
///
/// An explicit `pattern` (chrono `strftime` syntax) takes priority over the
/// style pair. With neither style nor pattern the rendering is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateFormat {
    pub date_style: Option<DateStyle>,
    pub time_style: Option<DateStyle>,
    pub pattern: Option<String>,
}

impl DateFormat {
    pub fn styles(date_style: Option<DateStyle>, time_style: Option<DateStyle>) -> Self {
        Self {
            date_style,
            time_style,
            pattern: None,
        }
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Default::default()
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

struct StylePatterns {
    date: [&'static str; 4],
    time: [&'static str; 4],
    joiner: &'static str,
}

const EN_US: StylePatterns = StylePatterns {
    date: ["%-m/%-d/%y", "%b %-d, %Y", "%B %-d, %Y", "%A, %B %-d, %Y"],
    time: ["%-I:%M %p", "%-I:%M:%S %p", "%-I:%M:%S %p %Z", "%-I:%M:%S %p %Z"],
    joiner: ", ",
};

const EN: StylePatterns = StylePatterns {
    date: ["%d/%m/%Y", "%-d %b %Y", "%-d %B %Y", "%A, %-d %B %Y"],
    time: ["%H:%M", "%H:%M:%S", "%H:%M:%S %Z", "%H:%M:%S %Z"],
    joiner: ", ",
};

const DOTTED: StylePatterns = StylePatterns {
    date: ["%d.%m.%y", "%d.%m.%Y", "%-d.%m.%Y", "%-d.%m.%Y"],
    time: ["%H:%M", "%H:%M:%S", "%H:%M:%S %Z", "%H:%M:%S %Z"],
    joiner: ", ",
};

const SLASHED: StylePatterns = StylePatterns {
    date: ["%d/%m/%Y", "%d/%m/%Y", "%-d/%m/%Y", "%-d/%m/%Y"],
    time: ["%H:%M", "%H:%M:%S", "%H:%M:%S %Z", "%H:%M:%S %Z"],
    joiner: " ",
};

const YEAR_FIRST: StylePatterns = StylePatterns {
    date: ["%Y/%m/%d", "%Y/%m/%d", "%Y/%m/%d", "%Y/%m/%d"],
    time: ["%H:%M", "%H:%M:%S", "%H:%M:%S %Z", "%H:%M:%S %Z"],
    joiner: " ",
};

const ISO: StylePatterns = StylePatterns {
    date: ["%Y-%m-%d", "%Y-%m-%d", "%Y-%m-%d", "%Y-%m-%d"],
    time: ["%H:%M", "%H:%M:%S", "%H:%M:%S %Z", "%H:%M:%S %Z"],
    joiner: " ",
};

fn style_patterns(locale: &str) -> &'static StylePatterns {
    let normalized = normalize_locale(locale);
    match base_language(locale).as_str() {
        "en" if normalized == "en" || normalized == "en-us" => &EN_US,
        "en" => &EN,
        "de" | "ru" | "pl" | "cs" | "fi" | "nb" | "da" | "tr" | "uk" => &DOTTED,
        "fr" | "es" | "it" | "pt" | "el" | "id" => &SLASHED,
        "ja" | "zh" | "ko" => &YEAR_FIRST,
        _ => &ISO,
    }
}

fn style_index(style: DateStyle) -> usize {
    match style {
        DateStyle::Short => 0,
        DateStyle::Medium => 1,
        DateStyle::Long => 2,
        DateStyle::Full => 3,
    }
}

/// Render `value` for `locale` according to `format`.
pub fn format_date(
    value: &DateTime<Utc>,
    format: &DateFormat,
    locale: &str,
) -> Result<String, ResolveError> {
    if let Some(pattern) = &format.pattern {
        return render(value, pattern);
    }

    let patterns = style_patterns(locale);
    let date = format
        .date_style
        .map(|s| render(value, patterns.date[style_index(s)]))
        .transpose()?;
    let time = format
        .time_style
        .map(|s| render(value, patterns.time[style_index(s)]))
        .transpose()?;

    Ok(match (date, time) {
        (Some(date), Some(time)) => format!("{date}{}{time}", patterns.joiner),
        (Some(date), None) => date,
        (None, Some(time)) => time,
        (None, None) => String::new(),
    })
}

fn render(value: &DateTime<Utc>, pattern: &str) -> Result<String, ResolveError> {
    let mut out = String::new();
    write!(out, "{}", value.format(pattern)).map_err(|_| ResolveError::InvalidDatePattern {
        pattern: pattern.to_string(),
    })?;
    Ok(out)
}
