//! Where original dataset blobs come from.

use std::future::Future;
use std::path::{
    Path,
    PathBuf,
};

use super::DatasetError;

/// Fetches the raw compressed blob of a dataset by its identifier.
pub trait DatasetSource {
    /// # Errors
    /// The blob could not be fetched.
    fn fetch(&self, id: &str) -> impl Future<Output = Result<String, DatasetError>> + Send;
}

/// Reads `<root>/<id>.txt`, the layout of a mirrored dataset CDN.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    /// Directory holding the blobs
    root: PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Blob file for dataset `id`.
    #[must_use]
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.txt"))
    }
}

impl DatasetSource for DirectorySource {
    fn fetch(&self, id: &str) -> impl Future<Output = Result<String, DatasetError>> + Send {
        let path = self.path_for(id);
        async move {
            tracing::debug!(path = %path.display(), "Fetching dataset blob");
            tokio::fs::read_to_string(&path).await.map_err(|e| DatasetError::io(path, e))
        }
    }
}
