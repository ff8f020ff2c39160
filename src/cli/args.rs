//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Load every locale resource and summarize the store
//! - `get`: Look up one key with region → language fallback
//! - `init`: Initialize a `.locbakerc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Get(cmd)) => cmd.common.verbose,
            Some(Command::Init(_)) | None => false,
        }
    }
}

/// Common arguments shared by store commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root; config lookup and relative resource roots start here
    #[arg(long, env = "LOCBAKE_ROOT")]
    pub root: Option<PathBuf>,

    /// Locale resource directory (overrides config file, repeatable)
    #[arg(long = "resource-root")]
    pub resource_roots: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct GetCommand {
    /// Dotted key, e.g. `Greeting.title`
    pub key: String,

    /// Locale to look up (overrides `defaultLocale`)
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Element index for array values
    #[arg(short, long)]
    pub index: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to write the config into
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load locale resources and report what the store contains
    Check(CheckCommand),
    /// Print the value stored for a key, falling back to the base language
    Get(GetCommand),
    /// Initialize a new .locbakerc.json configuration file
    Init(InitCommand),
}
