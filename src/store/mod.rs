//! Translation storage
/// Translation bundle files
mod bundle;
/// Key-value backends
mod kv;
/// The translation catalog store
mod translation;
/// Errors and key settings
mod types;

pub use bundle::{
    bundle_path,
    parse_bundle,
    read_bundle,
};
pub use kv::{
    FileStore,
    KeyValueStore,
    MemoryStore,
};
pub use translation::{
    TranslationStore,
    is_storable,
};
pub use types::{
    BundleError,
    StoreError,
    StoreKeys,
};
