//! Dataset type definitions.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    /// Reading or writing a dataset or host blob failed
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The blob did not decompress to any text
    #[error("Failed to decompress dataset '{0}'")]
    Decompress(String),
    /// The decompressed text is not a `{ table: csv }` object
    #[error("Failed to parse dataset '{id}': {source}")]
    Parse {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize dataset collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DatasetError {
    /// Wrap an I/O error with the path it happened at.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
