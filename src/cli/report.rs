//! Output formatting for CLI commands.
//!
//! Kept apart from the commands so the library never prints.

use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;

use super::commands::check::CheckSummary;
use crate::core::StoreValue;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

pub fn print_check(summary: &CheckSummary, verbose: bool) {
    print_check_to(summary, verbose, &mut io::stdout().lock());
}

/// Print the store summary to a custom writer.
pub fn print_check_to<W: Write>(summary: &CheckSummary, verbose: bool, writer: &mut W) {
    if verbose || !summary.default_covered {
        for locale in &summary.locales {
            let _ = writeln!(
                writer,
                "  {:<10} {}",
                locale.locale.cyan(),
                plural(locale.keys, "key", "keys")
            );
        }
    }

    let line = format!(
        "Loaded {}: {}, {}",
        plural(summary.files, "resource file", "resource files"),
        plural(summary.locales.len(), "locale", "locales"),
        plural(summary.total_keys(), "key", "keys"),
    );

    if summary.default_covered {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), line.green());
    } else {
        let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), line.red());
        let _ = writeln!(
            writer,
            "{} default locale '{}' has no keys",
            "warning:".bold().yellow(),
            summary.default_locale
        );
    }
}

/// List the files the store was built from.
pub fn print_files(files: &[PathBuf]) {
    let mut writer = io::stderr().lock();
    for file in files {
        let _ = writeln!(writer, "{} {}", "loaded".dimmed(), file.display());
    }
}

pub fn print_value(value: &StoreValue) {
    print_value_to(value, &mut io::stdout().lock());
}

/// Arrays print one element per line.
pub fn print_value_to<W: Write>(value: &StoreValue, writer: &mut W) {
    for element in value.elements() {
        let _ = writeln!(writer, "{}", element.to_text());
    }
}

pub fn print_miss(key: &str, locale: &str, index: Option<usize>) {
    let target = match index {
        Some(index) => format!("{key}[{index}]"),
        None => key.to_string(),
    };
    eprintln!(
        "{} no value for '{}' in locale '{}'",
        "warning:".bold().yellow(),
        target,
        locale
    );
}

pub fn print_lookup_note(key: &str, locale: &str, exact: bool, kind: &str) {
    let source = if exact { "exact locale" } else { "base language" };
    eprintln!(
        "{} {} ({}) resolved for '{}' via {}",
        "note:".bold().cyan(),
        key,
        kind,
        locale,
        source
    );
}
