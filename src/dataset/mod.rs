//! Dataset collections: loading, caching, blob format and the host store
/// Compressed blob format
mod blob;
/// Cache of original collections
mod cache;
/// Host object store
mod host;
/// Original dataset sources
mod source;
/// Dataset errors
mod types;
/// Table listing filter
mod visibility;

pub use blob::{
    BlobCodec,
    LzBase64,
    decode_collection,
    encode_collection,
};
pub use cache::OriginalCache;
pub use host::{
    DirectoryHostStore,
    HostStore,
};
pub use source::{
    DatasetSource,
    DirectorySource,
};
pub use types::DatasetError;
pub use visibility::TableFilter;
