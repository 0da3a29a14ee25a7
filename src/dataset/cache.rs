//! In-memory cache of original (unpatched) dataset collections.
//!
//! Patching always starts from these originals, which is what makes repeated
//! apply passes idempotent. The cache is owned by the caller and handed to the
//! patch orchestration explicitly.

use std::collections::BTreeMap;

use super::{
    BlobCodec,
    DatasetError,
    DatasetSource,
    decode_collection,
};
use crate::types::DatasetCollection;

#[derive(Debug, Clone, Default)]
pub struct OriginalCache {
    /// Dataset id → original collection
    collections: BTreeMap<String, DatasetCollection>,
}

impl OriginalCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and decode dataset `id`, replacing any cached copy.
    ///
    /// Nothing is cached when the fetch or decode fails.
    ///
    /// # Errors
    /// Fetch, decompression or JSON failure for `id`.
    pub async fn load<S, C>(&mut self, source: &S, codec: &C, id: &str) -> Result<(), DatasetError>
    where
        S: DatasetSource,
        C: BlobCodec,
    {
        let collection = fetch_collection(source, codec, id).await?;
        self.insert(id, collection);
        Ok(())
    }

    /// Fetch every dataset in `ids` concurrently.
    ///
    /// Either all of them are cached or, on the first failure, none are.
    ///
    /// # Errors
    /// The first fetch, decompression or JSON failure.
    pub async fn load_all<S, C>(
        &mut self,
        source: &S,
        codec: &C,
        ids: &[String],
    ) -> Result<(), DatasetError>
    where
        S: DatasetSource,
        C: BlobCodec,
    {
        let loads = ids.iter().map(|id| async move {
            fetch_collection(source, codec, id).await.map(|collection| (id.clone(), collection))
        });
        let loaded = futures::future::try_join_all(loads).await?;

        for (id, collection) in loaded {
            self.insert(&id, collection);
        }
        Ok(())
    }

    pub fn insert(&mut self, id: &str, collection: DatasetCollection) {
        tracing::info!(id, tables = collection.len(), "Cached original dataset");
        self.collections.insert(id.to_string(), collection);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DatasetCollection> {
        self.collections.get(id)
    }

    /// Deep copy of a cached collection, safe to hand to an editor.
    #[must_use]
    pub fn snapshot(&self, id: &str) -> Option<DatasetCollection> {
        self.collections.get(id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.collections.contains_key(id)
    }

    /// Cached dataset ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

/// Fetch one blob and decode it.
async fn fetch_collection<S, C>(
    source: &S,
    codec: &C,
    id: &str,
) -> Result<DatasetCollection, DatasetError>
where
    S: DatasetSource,
    C: BlobCodec,
{
    let blob = source.fetch(id).await?;
    decode_collection(codec, id, &blob)
}
