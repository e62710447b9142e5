//! Loading of backing configuration files.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::ConfigError;

/// Resolves the backing file for `alias`: `<base_dir>/<alias>.<extension>`.
pub fn alias_path(base_dir: &Path, alias: &str, extension: &str) -> PathBuf {
    base_dir.join(format!("{alias}.{extension}"))
}

/// Loads and parses a TOML config file into its root table.
///
/// A file that is missing or not readable by this process is reported as
/// [`ConfigError::FileNotFound`]; `item` is the lookup that triggered the
/// load and only gives that error some context.
pub fn load_config_file(path: &Path, item: &str) -> Result<toml::Table, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;
            debug!(path = %path.display(), "loaded config file");
            Ok(table)
        }
        Err(e)
            if matches!(
                e.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ) =>
        {
            Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
                item: item.to_string(),
            })
        }
        Err(e) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
