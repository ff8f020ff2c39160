use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;
use serde_yaml::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{LocaleEntries, StoreValue, normalize_locale};
use crate::error::StoreError;

/// Flattened contents of one resource file, keyed by normalized locale.
pub type ParsedResource = HashMap<String, LocaleEntries>;

pub const DEFAULT_FILE_PATTERNS: &[&str] = &["*.yml", "*.yaml"];

/// Compile resource file name patterns.
pub fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>, StoreError> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p.as_ref()).map_err(|e| StoreError::Pattern {
                pattern: p.as_ref().to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Collect resource files under `dir`, recursively, in sorted path order.
pub fn scan_resource_files(dir: &Path, patterns: &[Pattern]) -> Result<Vec<PathBuf>, StoreError> {
    if !dir.is_dir() {
        return Err(StoreError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| StoreError::Io {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
            source: e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| patterns.iter().any(|p| p.matches(name)));
        if matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub fn parse_yaml_file(path: &Path) -> Result<ParsedResource, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_yaml_str(&content, path)
}

/// Parse YAML text whose top level maps locale identifiers to nested mappings.
///
/// `origin` is only used in error messages.
pub fn parse_yaml_str(content: &str, origin: &Path) -> Result<ParsedResource, StoreError> {
    let root: Value = serde_yaml::from_str(content).map_err(|e| StoreError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut result = ParsedResource::new();
    let map = match root {
        Value::Mapping(map) => map,
        // An empty file parses as null.
        Value::Null => return Ok(result),
        other => {
            return Err(StoreError::Parse {
                path: origin.to_path_buf(),
                message: format!(
                    "top level must map locale identifiers to values, found {}",
                    yaml_kind(&other)
                ),
            });
        }
    };

    for (locale, tree) in &map {
        let Some(locale) = key_text(locale) else {
            warn!(file = %origin.display(), "skipping non-scalar locale identifier");
            continue;
        };
        let locale = normalize_locale(&locale);
        let entries = result.entry(locale.clone()).or_default();
        match tree {
            Value::Mapping(_) => flatten_yaml(tree, String::new(), origin, entries)?,
            Value::Null => {}
            _ => warn!(
                file = %origin.display(),
                locale = %locale,
                "skipping locale whose value is not a mapping"
            ),
        }
    }

    Ok(result)
}

fn flatten_yaml(
    value: &Value,
    prefix: String,
    origin: &Path,
    result: &mut LocaleEntries,
) -> Result<(), StoreError> {
    match value {
        Value::Mapping(map) => {
            for (key, val) in map {
                let Some(key) = key_text(key) else {
                    debug!(file = %origin.display(), prefix = %prefix, "skipping non-scalar key");
                    continue;
                };
                let new_prefix = if prefix.is_empty() {
                    key
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_yaml(val, new_prefix, origin, result)?;
            }
        }
        Value::Sequence(seq) => {
            if let Some(array) = coerce_array(seq, &prefix, origin)? {
                result.insert(prefix, array);
            }
        }
        Value::Tagged(tagged) => flatten_yaml(&tagged.value, prefix, origin, result)?,
        Value::Null => {}
        scalar => {
            if let Some(value) = coerce_scalar(scalar) {
                result.insert(prefix, value);
            }
        }
    }
    Ok(())
}

/// Turn a YAML sequence into a typed array.
///
/// Returns `Ok(None)` when no element is a supported scalar, so the key is
/// dropped. Empty or mixed-type arrays are rejected.
fn coerce_array(
    seq: &[Value],
    key: &str,
    origin: &Path,
) -> Result<Option<StoreValue>, StoreError> {
    let type_error = |message: String| StoreError::Type {
        path: origin.to_path_buf(),
        key: key.to_string(),
        message,
    };

    if seq.is_empty() {
        return Err(type_error("empty arrays are not supported".to_string()));
    }

    let scalars: Vec<Option<StoreValue>> = seq.iter().map(coerce_scalar).collect();
    if scalars.iter().all(Option::is_none) {
        debug!(file = %origin.display(), key = %key, "dropping array without scalar elements");
        return Ok(None);
    }
    if scalars.iter().any(Option::is_none) {
        return Err(type_error(
            "arrays must contain only scalar values".to_string(),
        ));
    }

    let scalars: Vec<StoreValue> = scalars.into_iter().flatten().collect();
    let array = match &scalars[0] {
        StoreValue::String(_) => scalars
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(StoreValue::StringArray),
        StoreValue::Int(_) => scalars
            .iter()
            .map(|v| match v {
                StoreValue::Int(i) => Some(*i),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(StoreValue::IntArray),
        StoreValue::Double(_) => scalars
            .iter()
            .map(|v| match v {
                StoreValue::Double(d) => Some(*d),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(StoreValue::DoubleArray),
        StoreValue::Bool(_) => scalars
            .iter()
            .map(|v| match v {
                StoreValue::Bool(b) => Some(*b),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(StoreValue::BoolArray),
        _ => None,
    };

    array
        .map(Some)
        .ok_or_else(|| type_error("arrays must not mix value types".to_string()))
}

fn coerce_scalar(value: &Value) -> Option<StoreValue> {
    match value {
        Value::String(s) => Some(StoreValue::String(s.clone())),
        Value::Bool(b) => Some(StoreValue::Bool(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(StoreValue::Int(i)),
            None => n.as_f64().map(StoreValue::Double),
        },
        Value::Tagged(tagged) => coerce_scalar(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn key_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
