//! Batch patch of every dataset in the host store.

use thiserror::Error;

use crate::dataset::{
    BlobCodec,
    DatasetError,
    HostStore,
    OriginalCache,
    encode_collection,
};
use crate::patch::{
    patch,
    patch_with_policy,
};
use crate::policy::ColumnPolicy;
use crate::types::TranslationMap;

#[derive(Error, Debug)]
pub enum ApplyError {
    #[error("Failed to list host datasets: {0}")]
    Keys(#[source] DatasetError),
    #[error("Failed to encode patched dataset '{id}': {source}")]
    Encode {
        id: String,
        #[source]
        source: DatasetError,
    },
    #[error("Failed to read host dataset '{id}': {source}")]
    Read {
        id: String,
        #[source]
        source: DatasetError,
    },
    #[error("Failed to write patched dataset '{id}': {source}")]
    Write {
        id: String,
        #[source]
        source: DatasetError,
    },
}

/// Outcome of one apply pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Host keys rewritten with a patched collection
    pub patched: Vec<String>,
    /// Host keys whose stored blob already matched the patched collection
    pub unchanged: Vec<String>,
    /// Host keys left alone because no original was cached for them
    pub skipped: Vec<String>,
}

/// Rewrite every host dataset with `translations` applied to its cached original.
///
/// Host keys are processed one at a time in the order the host store lists
/// them. A key with no cached original is skipped with a warning, and a key
/// whose stored blob is already the patched one is not rewritten. Since each
/// pass starts from the originals, running it twice gives the same blobs.
///
/// With `policy` set, only cells in policy-eligible columns are replaced.
///
/// # Errors
/// - The host store could not be listed
/// - A patched collection could not be encoded, compared or written; keys
///   before it stay written
pub async fn apply_translations<H, C>(
    host: &H,
    cache: &OriginalCache,
    codec: &C,
    translations: &TranslationMap,
    policy: Option<&ColumnPolicy>,
) -> Result<ApplyReport, ApplyError>
where
    H: HostStore,
    C: BlobCodec,
{
    let keys = host.keys().await.map_err(ApplyError::Keys)?;
    let mut report = ApplyReport::default();

    for id in keys {
        let Some(original) = cache.get(&id) else {
            tracing::warn!(id = %id, "No original cached for host dataset, skipping");
            report.skipped.push(id);
            continue;
        };

        let patched = match policy {
            Some(policy) => patch_with_policy(original, translations, policy),
            None => patch(original, translations),
        };
        let blob = encode_collection(codec, &patched)
            .map_err(|source| ApplyError::Encode { id: id.clone(), source })?;
        let current =
            host.get(&id).await.map_err(|source| ApplyError::Read { id: id.clone(), source })?;
        if current.as_deref() == Some(blob.as_str()) {
            tracing::debug!(id = %id, "Host dataset already up to date");
            report.unchanged.push(id);
            continue;
        }
        host.put(&id, blob).await.map_err(|source| ApplyError::Write { id: id.clone(), source })?;

        tracing::debug!(id = %id, "Wrote patched dataset");
        report.patched.push(id);
    }

    tracing::info!(
        patched = report.patched.len(),
        unchanged = report.unchanged.len(),
        skipped = report.skipped.len(),
        "Applied translations to host store"
    );
    Ok(report)
}
