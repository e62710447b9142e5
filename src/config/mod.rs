//! File-backed configuration lookup and management.

mod error;
mod file;
mod path;
mod resolve;
mod store;
mod sweep;
mod tree;

pub use error::ConfigError;
pub use path::ItemPath;
pub use resolve::replace_wildcards;
pub use store::{ConfigStore, ConfigStoreBuilder, DEFAULT_ALIAS, DEFAULT_EXTENSION};
pub use sweep::flatten;
