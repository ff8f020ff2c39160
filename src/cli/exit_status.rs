use std::process::ExitCode;

/// Process exit status of a `locbake` command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// `0`: the store loaded and the command got what it asked for. `check`
    /// found keys for the default locale, `get` found a value, `init` wrote
    /// the config.
    Success,
    /// `1`: the store loaded but the answer is negative. `check` found no keys
    /// for the default locale or its base language, `get` missed after the
    /// region→language fallback, `init` refused to overwrite an existing
    /// `.locbakerc.json` without `--force`.
    Failure,
    /// `2`: the command could not run. Invalid config, a missing resource
    /// directory, or a resource file that is unreadable, malformed or holds
    /// a mixed array.
    Error,
}

impl ExitStatus {
    /// `Success` when `found`, otherwise `Failure`.
    pub fn found(found: bool) -> Self {
        if found {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
