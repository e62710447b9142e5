pub mod config;

pub use config::{ConfigError, ConfigStore, ConfigStoreBuilder};
pub use toml::{Table, Value};
