//! Descent into loaded configuration trees.
//!
//! Tables are indexed by key. Sequences are indexed by a segment made only
//! of ASCII digits, so `hosts.0` addresses the first element of `hosts`.

use std::path::Path;

use toml::{Table, Value};

use super::path::ItemPath;
use super::ConfigError;

/// Walks `path.keys()` from `root` and returns the value found there.
///
/// Fails with [`ConfigError::InvalidKey`] naming the first segment that
/// does not exist.
pub fn lookup<'t>(
    root: &'t Table,
    path: &ItemPath<'_>,
    file: &Path,
) -> Result<&'t Value, ConfigError> {
    let (first, rest) = path
        .keys()
        .split_first()
        .ok_or_else(|| ConfigError::InvalidArgument(format!("no key in item '{}'", path.item())))?;

    let mut current = root.get(*first).ok_or_else(|| invalid_key(first, path, file))?;
    for key in rest {
        current = child(current, key).ok_or_else(|| invalid_key(key, path, file))?;
    }
    Ok(current)
}

/// Stores `value` at `path.keys()` inside `root`, creating or overwriting the
/// final key. Intermediate segments must already exist.
pub fn assign(
    root: &mut Table,
    path: &ItemPath<'_>,
    file: &Path,
    value: Value,
) -> Result<(), ConfigError> {
    let (last, parents) = path
        .keys()
        .split_last()
        .ok_or_else(|| ConfigError::InvalidArgument(format!("no key in item '{}'", path.item())))?;

    let Some((first, rest)) = parents.split_first() else {
        root.insert((*last).to_string(), value);
        return Ok(());
    };

    let mut current = root.get_mut(*first).ok_or_else(|| invalid_key(first, path, file))?;
    for key in rest {
        current = child_mut(current, key).ok_or_else(|| invalid_key(key, path, file))?;
    }

    match current {
        Value::Table(table) => {
            table.insert((*last).to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let slot = sequence_index(last)
                .and_then(|i| items.get_mut(i))
                .ok_or_else(|| invalid_key(last, path, file))?;
            *slot = value;
            Ok(())
        }
        _ => Err(invalid_key(last, path, file)),
    }
}

/// Renders a scalar as text. Tables and sequences have no scalar form.
pub fn scalar_to_string(value: &Value, item: &str) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(dt) => Ok(dt.to_string()),
        Value::Array(_) | Value::Table(_) => Err(ConfigError::NonScalarValue(item.to_string())),
    }
}

fn child<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    match value {
        Value::Table(table) => table.get(key),
        Value::Array(items) => sequence_index(key).and_then(|i| items.get(i)),
        _ => None,
    }
}

fn child_mut<'v>(value: &'v mut Value, key: &str) -> Option<&'v mut Value> {
    match value {
        Value::Table(table) => table.get_mut(key),
        Value::Array(items) => sequence_index(key).and_then(|i| items.get_mut(i)),
        _ => None,
    }
}

fn sequence_index(key: &str) -> Option<usize> {
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

fn invalid_key(key: &str, path: &ItemPath<'_>, file: &Path) -> ConfigError {
    ConfigError::InvalidKey {
        key: key.to_string(),
        item: path.item().to_string(),
        file: file.to_path_buf(),
    }
}
