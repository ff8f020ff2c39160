use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::args::InitCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default config into `--root` (or the working directory).
pub fn init(cmd: InitCommand) -> Result<ExitStatus> {
    let dir = match cmd.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to read working directory")?,
    };
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !cmd.force {
        eprintln!(
            "Error: {} already exists (use --force to overwrite)",
            CONFIG_FILE_NAME
        );
        return Ok(ExitStatus::Failure);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    Ok(ExitStatus::Success)
}
