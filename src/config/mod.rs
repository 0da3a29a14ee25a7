//! Settings loaded from `.pb-translator.json`
mod loader;
mod manager;
mod types;

pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    PathsConfig,
    StorageConfig,
    TranslatorSettings,
    ValidationError,
};
