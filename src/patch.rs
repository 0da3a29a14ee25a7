//! Patch pipeline: exact-text substitution over a dataset collection.
//!
//! Matching is by whole cell text against the original-text keys of the
//! table's translations. Header rows are never touched, and each data row is
//! scanned up to its own length regardless of the header width.

use crate::csv;
use crate::policy::ColumnPolicy;
use crate::types::{
    DatasetCollection,
    TableTranslations,
    TranslationMap,
};

/// Apply one language's translations to every matching cell of `collection`.
///
/// Tables without translations are returned byte-identical, and translated
/// tables missing from the collection are ignored. Column names play no part
/// in matching.
#[must_use]
pub fn patch(collection: &DatasetCollection, translations: &TranslationMap) -> DatasetCollection {
    patch_collection(collection, translations, None)
}

/// Like [`patch`], but only cells in columns allowed by `policy` are replaced.
#[must_use]
pub fn patch_with_policy(
    collection: &DatasetCollection,
    translations: &TranslationMap,
    policy: &ColumnPolicy,
) -> DatasetCollection {
    patch_collection(collection, translations, Some(policy))
}

/// Shared implementation of [`patch`] and [`patch_with_policy`].
fn patch_collection(
    collection: &DatasetCollection,
    translations: &TranslationMap,
    policy: Option<&ColumnPolicy>,
) -> DatasetCollection {
    let mut patched = collection.clone();

    for (table_name, entries) in translations {
        let Some(csv_text) = collection.get(table_name) else {
            tracing::debug!(table = %table_name, "Table not in dataset, skipping");
            continue;
        };

        let (text, replaced) = patch_table(csv_text, entries, policy);
        tracing::debug!(table = %table_name, replaced, "Patched table");
        patched.insert(table_name.clone(), text);
    }

    patched
}

/// Patch a single CSV table and re-encode it.
///
/// Returns the encoded table and the number of replaced cells.
#[must_use]
pub fn patch_table(
    csv_text: &str,
    entries: &TableTranslations,
    policy: Option<&ColumnPolicy>,
) -> (String, usize) {
    let mut table = csv::decode(csv_text);
    let eligible = policy.map(|policy| policy.eligible_columns(table.header()));
    let mut replaced = 0;

    for row in table.data_rows_mut() {
        for (index, cell) in row.iter_mut().enumerate() {
            if eligible.as_ref().is_some_and(|columns| !columns.contains(&index)) {
                continue;
            }
            if let Some(translated) = entries.get(cell.as_str()).filter(|t| !t.is_empty()) {
                cell.clone_from(translated);
                replaced += 1;
            }
        }
    }

    (csv::encode(&table), replaced)
}
