use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::args::CommonArgs;
use crate::config::{Config, load_config};
use crate::core::LocaleStore;

/// Configuration and loaded store for one CLI invocation.
pub struct StoreContext {
    pub config: Config,
    pub root_dir: PathBuf,
    pub resource_dirs: Vec<PathBuf>,
    pub store: LocaleStore,
    pub verbose: bool,
}

impl StoreContext {
    /// Load the config found from `--root` (or the working directory) and the
    /// store it points at. `--resource-root` replaces the configured roots.
    pub fn load(args: &CommonArgs) -> Result<Self> {
        let root_dir = match &args.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Failed to read working directory")?,
        };

        let config_result = load_config(&root_dir)?;
        if args.verbose && !config_result.from_file() {
            eprintln!("Note: No .locbakerc.json found, using default configuration");
        }
        let config = config_result.config;

        let resource_dirs = if args.resource_roots.is_empty() {
            config.resource_dirs(&root_dir)
        } else {
            resolve_dirs(&root_dir, &args.resource_roots)
        };

        let store = LocaleStore::load_with(&resource_dirs, &config.load_options())
            .context("Failed to load locale resources")?;

        Ok(Self {
            config,
            root_dir,
            resource_dirs,
            store,
            verbose: args.verbose,
        })
    }
}

fn resolve_dirs(root: &Path, dirs: &[PathBuf]) -> Vec<PathBuf> {
    dirs.iter().map(|dir| root.join(dir)).collect()
}
