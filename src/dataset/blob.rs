//! Compressed blob format shared by the dataset CDN and the host store.
//!
//! A blob is `compressToBase64(JSON(collection))` in LZ-string terms.

use super::DatasetError;
use crate::types::DatasetCollection;

/// Text compression used for dataset blobs.
pub trait BlobCodec {
    fn compress(&self, text: &str) -> String;

    /// Returns `None` when `blob` is not valid compressed data.
    fn decompress(&self, blob: &str) -> Option<String>;
}

/// LZ-string compression with the URI-unsafe base64 alphabet.
#[derive(Debug, Clone, Copy, Default)]
pub struct LzBase64;

impl BlobCodec for LzBase64 {
    fn compress(&self, text: &str) -> String {
        lz_str::compress_to_base64(text)
    }

    fn decompress(&self, blob: &str) -> Option<String> {
        let wide = lz_str::decompress_from_base64(blob.trim())?;
        String::from_utf16(&wide).ok()
    }
}

/// Serialize a collection into a blob.
///
/// # Errors
/// JSON serialization failure.
pub fn encode_collection<C: BlobCodec + ?Sized>(
    codec: &C,
    collection: &DatasetCollection,
) -> Result<String, DatasetError> {
    let json = serde_json::to_string(collection)?;
    Ok(codec.compress(&json))
}

/// Parse a blob fetched for dataset `id`.
///
/// # Errors
/// - Decompression yields nothing
/// - The JSON is not a `{ table: csv }` object
pub fn decode_collection<C: BlobCodec + ?Sized>(
    codec: &C,
    id: &str,
    blob: &str,
) -> Result<DatasetCollection, DatasetError> {
    let json = codec
        .decompress(blob)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| DatasetError::Decompress(id.to_string()))?;

    serde_json::from_str(&json).map_err(|source| DatasetError::Parse { id: id.to_string(), source })
}
