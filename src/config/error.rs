use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid item: {0}")]
    InvalidArgument(String),

    #[error("the configuration file '{path}' for item '{item}' does not exist")]
    FileNotFound { path: PathBuf, item: String },

    #[error("the key '{key}' does not exist, item: {item}, file: {file}")]
    InvalidKey {
        key: String,
        item: String,
        file: PathBuf,
    },

    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("cannot substitute non-scalar value: {0}")]
    NonScalarValue(String),

    #[error("failed to deserialize config value: {0}")]
    Deserialize(#[from] toml::de::Error),
}

impl ConfigError {
    /// Returns true for the missing-key failure that defaults and
    /// existence checks are allowed to absorb.
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Self::InvalidKey { .. })
    }
}
