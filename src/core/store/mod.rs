//! Flattened, read-only locale store.
//!
//! Resource files map locale identifiers to nested YAML trees:
//!
//! ```yaml
//! en:
//!   Greeting:
//!     title: Hello
//! en-GB:
//!   Greeting:
//!     colour: Colour
//! ```
//!
//! Loading flattens every tree into dotted keys (`Greeting.title`). Lookups try
//! the exact locale first and then its base language (`en-GB` → `en`).

mod value;
pub mod yaml;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use tracing::{debug, info};

pub use value::StoreValue;
use yaml::{DEFAULT_FILE_PATTERNS, compile_patterns, parse_yaml_file, parse_yaml_str, scan_resource_files};

use crate::error::StoreError;

/// Dotted key → value for a single locale.
pub type LocaleEntries = HashMap<String, StoreValue>;

/// Lower-case a locale identifier and use `-` as the only separator.
pub fn normalize_locale(locale: &str) -> String {
    locale.trim().replace('_', "-").to_lowercase()
}

/// Language part of a locale identifier: `en-GB` → `en`, `zh_Hant_TW` → `zh`.
pub fn base_language(locale: &str) -> String {
    locale
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Options for [`LocaleStore::load_with`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// File name globs matched against each file in the search directories.
    pub file_patterns: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            file_patterns: DEFAULT_FILE_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Immutable map of `locale -> dotted key -> value`.
///
/// Built once; safe to share across threads (`&LocaleStore` or `Arc<LocaleStore>`)
/// and read by any number of concurrent resolution passes.
#[derive(Debug, Clone, Default)]
pub struct LocaleStore {
    locales: HashMap<String, LocaleEntries>,
    files: Vec<PathBuf>,
}

impl LocaleStore {
    /// Load every `*.yml`/`*.yaml` file found under `paths`.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, StoreError> {
        Self::load_with(paths, &LoadOptions::default())
    }

    pub fn load_with<P: AsRef<Path>>(
        paths: &[P],
        options: &LoadOptions,
    ) -> Result<Self, StoreError> {
        if paths.is_empty() {
            return Err(StoreError::NoSearchPaths);
        }

        let patterns = compile_patterns(&options.file_patterns)?;
        let mut files = Vec::new();
        for path in paths {
            files.extend(scan_resource_files(path.as_ref(), &patterns)?);
        }

        // Parse in parallel; merge in path order so later files win deterministically.
        let parsed = files
            .par_iter()
            .map(|file| parse_yaml_file(file))
            .collect::<Result<Vec<_>, _>>()?;

        let mut store = LocaleStore {
            locales: HashMap::new(),
            files: files.clone(),
        };
        for (file, resource) in files.iter().zip(parsed) {
            debug!(file = %file.display(), locales = resource.len(), "loaded locale resource");
            store.merge(resource);
        }

        info!(
            files = store.files.len(),
            locales = store.locales.len(),
            keys = store.len(),
            "locale store ready"
        );
        Ok(store)
    }

    /// Build a store from YAML text. Useful for embedded resources and tests.
    pub fn from_yaml_str(content: &str) -> Result<Self, StoreError> {
        let mut store = LocaleStore::default();
        store.merge(parse_yaml_str(content, Path::new("<inline>"))?);
        Ok(store)
    }

    fn merge(&mut self, resource: yaml::ParsedResource) {
        for (locale, entries) in resource {
            self.locales.entry(locale).or_default().extend(entries);
        }
    }

    /// Look up `key` for `locale`, falling back to the base language.
    ///
    /// With `index`, the value must be an array; the element at `index` is
    /// returned, or `None` when the value is a scalar or the index is out of range.
    pub fn get(&self, key: &str, locale: &str, index: Option<usize>) -> Option<StoreValue> {
        let value = self.lookup(key, locale)?;
        match index {
            Some(index) => value.element(index),
            None => Some(value.clone()),
        }
    }

    /// [`get`](Self::get) with a caller-supplied default for soft misses.
    pub fn get_or(
        &self,
        key: &str,
        locale: &str,
        index: Option<usize>,
        default: StoreValue,
    ) -> StoreValue {
        self.get(key, locale, index).unwrap_or(default)
    }

    /// Borrow the raw value for `key` with region → language fallback.
    pub fn lookup(&self, key: &str, locale: &str) -> Option<&StoreValue> {
        let exact = normalize_locale(locale);
        if let Some(value) = self.locales.get(&exact).and_then(|entries| entries.get(key)) {
            return Some(value);
        }

        let base = base_language(locale);
        if base != exact {
            return self.locales.get(&base).and_then(|entries| entries.get(key));
        }
        None
    }

    pub fn contains(&self, key: &str, locale: &str) -> bool {
        self.lookup(key, locale).is_some()
    }

    /// Normalized locale identifiers, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Keys defined directly for `locale` (no fallback), sorted.
    pub fn keys(&self, locale: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .locales
            .get(&normalize_locale(locale))
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Files the store was loaded from, in merge order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Total number of keys across all locales.
    pub fn len(&self) -> usize {
        self.locales.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
