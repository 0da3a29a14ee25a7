//! Store type definitions.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Failed to access key-value store: {0}")]
    Io(#[from] std::io::Error),
    /// Atomic replace of a value file failed
    #[error("Failed to persist value: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error("Failed to serialize translations: {0}")]
    Serialize(#[from] serde_json::Error),
    /// In-memory backend lock was poisoned by a panicking writer
    #[error("Key-value store lock poisoned")]
    Poisoned,
}

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Failed to read translation bundle {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse translation bundle: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Keys and defaults used by [`TranslationStore`](super::TranslationStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
    /// Key holding the whole translation catalog as JSON
    pub translations: String,
    /// Key holding the active language code
    pub language: String,
    /// Language used when no active language is stored
    pub default_language: String,
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self {
            translations: "pathbuilder_translations".to_string(),
            language: "pathbuilder_lang".to_string(),
            default_language: "en".to_string(),
        }
    }
}
