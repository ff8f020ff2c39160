use anyhow::Result;

use super::super::args::GetCommand;
use super::super::exit_status::ExitStatus;
use super::super::report;
use super::context::StoreContext;
use crate::core::normalize_locale;

pub fn get(cmd: GetCommand) -> Result<ExitStatus> {
    let ctx = StoreContext::load(&cmd.common)?;
    let locale = cmd
        .locale
        .unwrap_or_else(|| ctx.config.default_locale.clone());

    let Some(value) = ctx.store.get(&cmd.key, &locale, cmd.index) else {
        report::print_miss(&cmd.key, &locale, cmd.index);
        return Ok(ExitStatus::Failure);
    };

    if ctx.verbose {
        let exact = ctx.store.keys(&locale).contains(&cmd.key.as_str());
        report::print_lookup_note(&cmd.key, &normalize_locale(&locale), exact, value.kind());
    }
    report::print_value(&value);

    Ok(ExitStatus::Success)
}
