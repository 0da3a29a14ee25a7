//! Core types used throughout the project.
//!
//! Ordered maps are used everywhere so that serialized stores and dataset
//! blobs come out byte-for-byte deterministic.

use std::collections::BTreeMap;

/// One dataset: table name → CSV text of that table.
pub type DatasetCollection = BTreeMap<String, String>;

/// Translations for a single table: original cell text → translated text.
pub type TableTranslations = BTreeMap<String, String>;

/// One language's translations: table name → [`TableTranslations`].
pub type TranslationMap = BTreeMap<String, TableTranslations>;

/// Every language's translations: language code → [`TranslationMap`].
///
/// This is exactly the persisted shape `{ lang: { table: { original: translated } } }`.
pub type TranslationCatalog = BTreeMap<String, TranslationMap>;
