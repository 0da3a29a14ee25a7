//! Translation bundles: one language's translations shipped as a JSON file.
//!
//! A bundle has the shape `{ table: { original: translated } }` and replaces
//! the language's slot in the store wholesale.

use std::path::{
    Path,
    PathBuf,
};

use super::BundleError;
use crate::types::TranslationMap;

/// Parse bundle JSON text.
///
/// # Errors
/// Returns error if the text is not a `{ table: { original: translated } }` object.
pub fn parse_bundle(text: &str) -> Result<TranslationMap, BundleError> {
    Ok(serde_json::from_str(text)?)
}

/// Read and parse a bundle file.
///
/// # Errors
/// Returns error if file read or JSON parse fails.
pub async fn read_bundle(path: &Path) -> Result<TranslationMap, BundleError> {
    tracing::debug!("Loading translation bundle from: {:?}", path);

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BundleError::Read { path: path.to_path_buf(), source })?;

    parse_bundle(&content)
}

/// Conventional location of a language's bundle inside `dir`.
#[must_use]
pub fn bundle_path(dir: &Path, lang: &str) -> PathBuf {
    dir.join(format!("{lang}.json"))
}
