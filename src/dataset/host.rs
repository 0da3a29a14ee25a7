//! The host application's object store, keyed by dataset id.

use std::future::Future;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use tempfile::NamedTempFile;

use super::DatasetError;

/// Key → blob store the host application loads its datasets from.
pub trait HostStore {
    /// Every dataset id currently stored, in the store's iteration order.
    ///
    /// # Errors
    /// The store could not be enumerated.
    fn keys(&self) -> impl Future<Output = Result<Vec<String>, DatasetError>> + Send;

    /// # Errors
    /// The store could not be read.
    fn get(&self, id: &str) -> impl Future<Output = Result<Option<String>, DatasetError>> + Send;

    /// # Errors
    /// The store could not be written.
    fn put(&self, id: &str, blob: String) -> impl Future<Output = Result<(), DatasetError>> + Send;
}

/// Host store kept as `<root>/<id>.txt` files.
#[derive(Debug, Clone)]
pub struct DirectoryHostStore {
    /// Directory holding one blob file per dataset id
    root: PathBuf,
}

impl DirectoryHostStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Blob file for dataset `id`.
    fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.txt"))
    }
}

impl HostStore for DirectoryHostStore {
    fn keys(&self) -> impl Future<Output = Result<Vec<String>, DatasetError>> + Send {
        let root = self.root.clone();
        async move {
            let mut entries = match tokio::fs::read_dir(&root).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(root = %root.display(), "Host store not created yet");
                    return Ok(Vec::new());
                }
                Err(e) => return Err(DatasetError::io(root, e)),
            };

            let mut keys = Vec::new();
            while let Some(entry) =
                entries.next_entry().await.map_err(|e| DatasetError::io(&root, e))?
            {
                let path = entry.path();
                if path.extension().is_none_or(|ext| ext != "txt") {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    keys.push(stem.to_string());
                }
            }

            keys.sort();
            Ok(keys)
        }
    }

    fn get(&self, id: &str) -> impl Future<Output = Result<Option<String>, DatasetError>> + Send {
        let path = self.path_for(id);
        async move {
            match tokio::fs::read_to_string(&path).await {
                Ok(blob) => Ok(Some(blob)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(DatasetError::io(path, e)),
            }
        }
    }

    fn put(&self, id: &str, blob: String) -> impl Future<Output = Result<(), DatasetError>> + Send {
        let root = self.root.clone();
        let path = self.path_for(id);
        async move {
            let target = path.clone();
            tokio::task::spawn_blocking(move || write_atomically(&root, &target, &blob))
                .await
                .map_err(|e| DatasetError::io(&path, std::io::Error::other(e)))?
        }
    }
}

/// Write `blob` to `path` through a temporary file in `root`.
///
/// Readers see either the previous blob or the new one, never a partial write.
fn write_atomically(root: &Path, path: &Path, blob: &str) -> Result<(), DatasetError> {
    std::fs::create_dir_all(root).map_err(|e| DatasetError::io(root, e))?;

    let mut temp_file = NamedTempFile::new_in(root).map_err(|e| DatasetError::io(root, e))?;
    temp_file.write_all(blob.as_bytes()).map_err(|e| DatasetError::io(temp_file.path(), e))?;
    temp_file.persist(path).map_err(|e| DatasetError::io(path, e.error))?;

    Ok(())
}
