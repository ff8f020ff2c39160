use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::LoadOptions;
use crate::core::store::yaml::DEFAULT_FILE_PATTERNS;

pub const CONFIG_FILE_NAME: &str = ".locbakerc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_resource_roots")]
    pub resource_roots: Vec<String>,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_file_patterns")]
    pub file_patterns: Vec<String>,
}

fn default_resource_roots() -> Vec<String> {
    vec!["./locales".to_string()]
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_file_patterns() -> Vec<String> {
    DEFAULT_FILE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resource_roots: default_resource_roots(),
            default_locale: default_locale(),
            file_patterns: default_file_patterns(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a file pattern is not a valid glob or a list is empty.
    pub fn validate(&self) -> Result<()> {
        if self.resource_roots.is_empty() {
            anyhow::bail!("'resourceRoots' must name at least one directory");
        }
        if self.default_locale.trim().is_empty() {
            anyhow::bail!("'defaultLocale' must not be empty");
        }
        for pattern in &self.file_patterns {
            Pattern::new(pattern).with_context(|| {
                format!("Invalid glob pattern in 'filePatterns': \"{}\"", pattern)
            })?;
        }
        Ok(())
    }

    /// Resource directories resolved against `base`.
    pub fn resource_dirs(&self, base: &Path) -> Vec<PathBuf> {
        self.resource_roots
            .iter()
            .map(|root| base.join(root))
            .collect()
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            file_patterns: self.file_patterns.clone(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config was read from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
