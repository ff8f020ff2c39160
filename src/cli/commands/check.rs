use anyhow::Result;

use super::super::args::CheckCommand;
use super::super::exit_status::ExitStatus;
use super::super::report;
use super::context::StoreContext;
use crate::core::{base_language, normalize_locale};

/// Key count for one locale of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSummary {
    pub locale: String,
    pub keys: usize,
}

#[derive(Debug)]
pub struct CheckSummary {
    pub files: usize,
    pub locales: Vec<LocaleSummary>,
    pub default_locale: String,
    /// Whether the default locale, or its base language, has any keys.
    pub default_covered: bool,
}

impl CheckSummary {
    pub fn total_keys(&self) -> usize {
        self.locales.iter().map(|l| l.keys).sum()
    }
}

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let ctx = StoreContext::load(&cmd.common)?;
    let summary = summarize(&ctx);

    if ctx.verbose {
        report::print_files(ctx.store.files());
    }
    report::print_check(&summary, ctx.verbose);

    Ok(ExitStatus::found(summary.default_covered))
}

fn summarize(ctx: &StoreContext) -> CheckSummary {
    let store = &ctx.store;
    let locales: Vec<LocaleSummary> = store
        .locales()
        .into_iter()
        .map(|locale| LocaleSummary {
            locale: locale.to_string(),
            keys: store.keys(locale).len(),
        })
        .collect();

    let default_locale = normalize_locale(&ctx.config.default_locale);
    let base = base_language(&default_locale);
    let default_covered = locales
        .iter()
        .any(|l| l.keys > 0 && (l.locale == default_locale || l.locale == base));

    CheckSummary {
        files: store.files().len(),
        locales,
        default_locale,
        default_covered,
    }
}
