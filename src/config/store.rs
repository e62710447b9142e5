use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use toml::{Table, Value};
use tracing::{debug, trace};

use super::file::{alias_path, load_config_file};
use super::path::ItemPath;
use super::resolve::replace_wildcards;
use super::sweep::flatten;
use super::tree::{assign, lookup, scalar_to_string};
use super::ConfigError;

/// Extension appended to an alias to find its backing file.
pub const DEFAULT_EXTENSION: &str = "toml";

/// Alias used by [`ConfigStore::sweep_default`] and for wildcard lookups.
pub const DEFAULT_ALIAS: &str = "config";

/// File-backed configuration accessor with an in-memory cache.
///
/// Items are addressed as `alias.key1.key2...`. The alias names a TOML file
/// `<base_dir>/<alias>.toml`, loaded on first access and cached until
/// [`clear_cache`](Self::clear_cache) is called. Overrides made with
/// [`set`](Self::set) live in the cache only; files on disk are never
/// written.
///
/// ## Example
///
/// ```no_run
/// use config_store::ConfigStore;
///
/// // config/app.toml:
/// //   [server]
/// //   host = "localhost"
/// //   port = 8080
/// let mut store = ConfigStore::init("config");
///
/// let port = store.get("app.server.port")?;
/// let timeout = store.get_or("app.server.timeout", 30)?;
/// store.set("app.server.host", "example.com")?;
/// # Ok::<(), config_store::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct ConfigStore {
    base_dir: PathBuf,
    extension: String,
    cache: HashMap<PathBuf, Table>,
}

impl ConfigStore {
    /// Creates a store that resolves aliases against `base_dir`.
    ///
    /// The directory is not checked here; a missing directory shows up as
    /// [`ConfigError::FileNotFound`] on first access.
    pub fn init(base_dir: impl AsRef<Path>) -> Self {
        Self::builder().with_base_dir(base_dir).build()
    }

    /// Creates a new store builder.
    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::default()
    }

    /// Directory that aliases are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns true if the file behind `alias` is currently cached.
    pub fn is_cached(&self, alias: &str) -> bool {
        self.cache.contains_key(&self.file_for(alias))
    }

    /// Drops every cached file so the next access re-reads it from disk.
    ///
    /// In-memory overrides made with [`set`](Self::set) are lost.
    pub fn clear_cache(&mut self) {
        debug!(files = self.cache.len(), "clearing config cache");
        self.cache.clear();
    }

    /// Returns the value at `item`.
    ///
    /// Fails with [`ConfigError::InvalidKey`] if any key along the path is
    /// missing. The value may be a scalar, or a table or sequence when the
    /// path stops above a leaf.
    pub fn get(&mut self, item: &str) -> Result<Value, ConfigError> {
        let path = ItemPath::parse(item)?;
        let file = self.file_for(path.alias());
        let table = self.load(&file, item)?;
        lookup(table, &path, &file).cloned()
    }

    /// Like [`get`](Self::get), but returns `default` when a key is missing.
    ///
    /// Only [`ConfigError::InvalidKey`] is replaced; a malformed item or a
    /// missing file still fails.
    pub fn get_or(&mut self, item: &str, default: impl Into<Value>) -> Result<Value, ConfigError> {
        match self.get(item) {
            Err(e) if e.is_invalid_key() => Ok(default.into()),
            other => other,
        }
    }

    /// Returns the value at `item` deserialized into `T`.
    pub fn get_as<T: DeserializeOwned>(&mut self, item: &str) -> Result<T, ConfigError> {
        let value = self.get(item)?;
        value.try_into().map_err(ConfigError::Deserialize)
    }

    /// Returns whether `item` resolves.
    ///
    /// Only a missing key yields `false`; every other failure is returned.
    pub fn item_exist(&mut self, item: &str) -> Result<bool, ConfigError> {
        match self.get(item) {
            Ok(_) => Ok(true),
            Err(e) if e.is_invalid_key() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Returns the value at `item` with `%name%` wildcards replaced by
    /// `config.name`.
    ///
    /// Wildcards always resolve against the `config` alias, whichever file
    /// `item` came from. Non-string values are returned unchanged.
    pub fn get_replaced(&mut self, item: &str) -> Result<Value, ConfigError> {
        let value = self.get(item)?;
        self.replace_value(value)
    }

    /// Like [`get_replaced`](Self::get_replaced), with a default for a
    /// missing `item`. The default is scanned for wildcards too.
    pub fn get_replaced_or(
        &mut self,
        item: &str,
        default: impl Into<Value>,
    ) -> Result<Value, ConfigError> {
        let value = self.get_or(item, default)?;
        self.replace_value(value)
    }

    /// Formats the `index`-th entry of the table at `item` as `key:value`.
    ///
    /// Entries are taken in file order. Sequences count as tables keyed by
    /// position. Returns `None` if `index` is out of range or `item` is a
    /// scalar.
    pub fn get_to_user_pwd(
        &mut self,
        item: &str,
        index: usize,
    ) -> Result<Option<String>, ConfigError> {
        let entry = match self.get(item)? {
            Value::Table(table) => table.into_iter().nth(index),
            Value::Array(items) => items.into_iter().nth(index).map(|v| (index.to_string(), v)),
            _ => None,
        };

        match entry {
            Some((key, value)) => Ok(Some(format!("{key}:{}", scalar_to_string(&value, item)?))),
            None => Ok(None),
        }
    }

    /// Sets `item` to `value` in memory and returns the stored value.
    ///
    /// The final key is created or overwritten; every key before it must
    /// already exist, otherwise [`ConfigError::InvalidKey`] is returned and
    /// nothing changes.
    pub fn set(&mut self, item: &str, value: impl Into<Value>) -> Result<Value, ConfigError> {
        let path = ItemPath::parse(item)?;
        let file = self.file_for(path.alias());
        let value = value.into();

        let table = self.load_mut(&file, item)?;
        assign(table, &path, &file, value.clone())?;
        debug!(item, file = %file.display(), "config item overridden in memory");
        Ok(value)
    }

    /// Flattens the file behind `alias` into `dotted.key -> leaf` pairs.
    ///
    /// See [`flatten`](crate::config::flatten) for how sequences and key
    /// collisions are handled.
    pub fn sweep(&mut self, alias: &str) -> Result<Table, ConfigError> {
        let file = self.file_for(alias);
        let table = self.load(&file, alias)?;
        Ok(flatten(table))
    }

    /// [`sweep`](Self::sweep) of the `config` alias.
    pub fn sweep_default(&mut self) -> Result<Table, ConfigError> {
        self.sweep(DEFAULT_ALIAS)
    }

    /// Returns a copy of the whole tree behind `alias`, including overrides.
    pub fn get_all(&mut self, alias: &str) -> Result<Table, ConfigError> {
        if alias.is_empty() {
            return Err(ConfigError::InvalidArgument("the item is empty".into()));
        }
        let file = self.file_for(alias);
        self.load(&file, alias).cloned()
    }

    fn replace_value(&mut self, value: Value) -> Result<Value, ConfigError> {
        let s = match value {
            Value::String(s) => s,
            other => return Ok(other),
        };

        let replaced = replace_wildcards(&s, |name| {
            let reference = format!("{DEFAULT_ALIAS}.{name}");
            let resolved = self.get(&reference)?;
            scalar_to_string(&resolved, &reference)
        })?;
        Ok(Value::String(replaced))
    }

    fn file_for(&self, alias: &str) -> PathBuf {
        alias_path(&self.base_dir, alias, &self.extension)
    }

    fn load(&mut self, file: &Path, item: &str) -> Result<&Table, ConfigError> {
        self.load_mut(file, item).map(|table| &*table)
    }

    fn load_mut(&mut self, file: &Path, item: &str) -> Result<&mut Table, ConfigError> {
        if self.cache.contains_key(file) {
            trace!(file = %file.display(), "config cache hit");
        } else {
            let table = load_config_file(file, item)?;
            self.cache.insert(file.to_path_buf(), table);
        }

        self.cache
            .get_mut(file)
            .ok_or_else(|| ConfigError::FileNotFound {
                path: file.to_path_buf(),
                item: item.to_string(),
            })
    }
}

/// Builder for a [`ConfigStore`].
///
/// Defaults to the current directory and the `toml` extension.
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigStoreBuilder {
    base_dir: PathBuf,
    extension: String,
}

impl Default for ConfigStoreBuilder {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl ConfigStoreBuilder {
    /// Sets the directory that aliases are resolved against.
    pub fn with_base_dir(mut self, base_dir: impl AsRef<Path>) -> Self {
        self.base_dir = base_dir.as_ref().to_path_buf();
        self
    }

    /// Sets the extension of backing files, without the leading dot.
    ///
    /// Files are always parsed as TOML; this only changes how aliases map
    /// to file names.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Builds an empty-cache store.
    ///
    /// A relative base directory is made absolute against the current
    /// directory, so cache keys do not change if the process later changes
    /// directory. The directory itself does not need to exist.
    pub fn build(self) -> ConfigStore {
        let base_dir = std::path::absolute(&self.base_dir).unwrap_or(self.base_dir);
        ConfigStore {
            base_dir,
            extension: self.extension,
            cache: HashMap::new(),
        }
    }
}
