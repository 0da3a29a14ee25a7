//! Translation catalog persisted as a single JSON value.
//!
//! Every operation reloads the whole catalog from the backend and writes the
//! whole catalog back. Nothing is cached between calls, so two writers racing
//! on the same backend resolve as last-write-wins.

use super::{
    KeyValueStore,
    StoreError,
    StoreKeys,
};
use crate::types::{
    TableTranslations,
    TranslationCatalog,
    TranslationMap,
};

/// Translation store over a [`KeyValueStore`] backend.
#[derive(Debug)]
pub struct TranslationStore<S> {
    /// Where the catalog and the active language live
    backend: S,
    /// Keys and defaults
    keys: StoreKeys,
}

impl<S: KeyValueStore> TranslationStore<S> {
    #[must_use]
    pub const fn new(backend: S, keys: StoreKeys) -> Self {
        Self { backend, keys }
    }

    #[must_use]
    pub fn with_default_keys(backend: S) -> Self {
        Self::new(backend, StoreKeys::default())
    }

    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    #[must_use]
    pub const fn keys(&self) -> &StoreKeys {
        &self.keys
    }

    /// Load the whole catalog.
    ///
    /// A missing, unreadable or malformed value loads as an empty catalog.
    #[must_use]
    pub fn load(&self) -> TranslationCatalog {
        let raw = match self.backend.get(&self.keys.translations) {
            Ok(Some(raw)) => raw,
            Ok(None) => return TranslationCatalog::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read translations, starting empty");
                return TranslationCatalog::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Stored translations are malformed, starting empty");
            TranslationCatalog::new()
        })
    }

    /// Replace the whole persisted catalog.
    ///
    /// # Errors
    /// Serialization or backend write failure.
    pub fn save(&self, catalog: &TranslationCatalog) -> Result<(), StoreError> {
        let json = serde_json::to_string(catalog)?;
        self.backend.set(&self.keys.translations, &json)
    }

    /// Look up the translation of `original` in `table` for `lang`.
    #[must_use]
    pub fn get(&self, lang: &str, table: &str, original: &str) -> Option<String> {
        self.load().get(lang)?.get(table)?.get(original).cloned()
    }

    /// Store or clear the translation of `original` in `table` for `lang`.
    ///
    /// A translation that is blank after trimming, or that equals `original`
    /// after trimming, removes the entry and prunes emptied parent maps.
    /// Otherwise `translated` is stored exactly as given.
    ///
    /// # Errors
    /// Serialization or backend write failure.
    pub fn set(
        &self,
        lang: &str,
        table: &str,
        original: &str,
        translated: &str,
    ) -> Result<(), StoreError> {
        let mut catalog = self.load();
        let stored = apply_entry(&mut catalog, lang, table, original, translated);
        tracing::debug!(lang, table, stored, "Updated translation");
        self.save(&catalog)
    }

    /// One language's translations, empty when the language has none.
    #[must_use]
    pub fn language_map(&self, lang: &str) -> TranslationMap {
        self.load().remove(lang).unwrap_or_default()
    }

    /// Replace every translation of `lang` with `map`.
    ///
    /// Entries that [`set`](Self::set) would refuse are dropped and emptied
    /// tables are pruned. Returns the number of entries kept.
    ///
    /// # Errors
    /// Serialization or backend write failure.
    pub fn replace_language(&self, lang: &str, map: TranslationMap) -> Result<usize, StoreError> {
        let cleaned: TranslationMap = map
            .into_iter()
            .filter_map(|(table, entries)| {
                let kept: TableTranslations = entries
                    .into_iter()
                    .filter(|(original, translated)| is_storable(original, translated))
                    .collect();
                (!kept.is_empty()).then_some((table, kept))
            })
            .collect();
        let count = cleaned.values().map(TableTranslations::len).sum();

        let mut catalog = self.load();
        if cleaned.is_empty() {
            catalog.remove(lang);
        } else {
            catalog.insert(lang.to_string(), cleaned);
        }
        self.save(&catalog)?;

        tracing::info!(lang, entries = count, "Replaced language translations");
        Ok(count)
    }

    /// Active language code, falling back to the configured default.
    #[must_use]
    pub fn current_language(&self) -> String {
        match self.backend.get(&self.keys.language) {
            Ok(Some(code)) if !code.trim().is_empty() => code.trim().to_string(),
            Ok(_) => self.keys.default_language.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read active language");
                self.keys.default_language.clone()
            }
        }
    }

    /// # Errors
    /// Backend write failure.
    pub fn set_current_language(&self, lang: &str) -> Result<(), StoreError> {
        self.backend.set(&self.keys.language, lang)
    }
}

/// Whether `translated` is worth storing for `original`.
#[must_use]
pub fn is_storable(original: &str, translated: &str) -> bool {
    let cleaned = translated.trim();
    !cleaned.is_empty() && cleaned != original
}

/// Insert or remove one entry in `catalog`. Returns whether a value was stored.
fn apply_entry(
    catalog: &mut TranslationCatalog,
    lang: &str,
    table: &str,
    original: &str,
    translated: &str,
) -> bool {
    if is_storable(original, translated) {
        catalog
            .entry(lang.to_string())
            .or_default()
            .entry(table.to_string())
            .or_default()
            .insert(original.to_string(), translated.to_string());
        true
    } else {
        remove_entry(catalog, lang, table, original);
        false
    }
}

/// Remove one entry, then drop the table and language maps if they emptied.
fn remove_entry(catalog: &mut TranslationCatalog, lang: &str, table: &str, original: &str) {
    let Some(tables) = catalog.get_mut(lang) else {
        return;
    };

    if let Some(entries) = tables.get_mut(table) {
        entries.remove(original);
        if entries.is_empty() {
            tables.remove(table);
        }
    }

    if tables.is_empty() {
        catalog.remove(lang);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::store::MemoryStore;
    use crate::test_utils::translations;

    fn store() -> TranslationStore<MemoryStore> {
        TranslationStore::with_default_keys(MemoryStore::new())
    }

    fn persisted(store: &TranslationStore<MemoryStore>) -> String {
        store.backend().get("pathbuilder_translations").unwrap().unwrap_or_default()
    }

    #[googletest::test]
    fn get_returns_none_for_missing_levels() {
        let store = store();
        store.set("ru", "spells", "Fireball", "Огненный шар").unwrap();

        expect_that!(store.get("de", "spells", "Fireball"), none());
        expect_that!(store.get("ru", "feats", "Fireball"), none());
        expect_that!(store.get("ru", "spells", "Heal"), none());
        expect_that!(store.get("ru", "spells", "Fireball"), some(eq("Огненный шар")));
    }

    #[googletest::test]
    fn set_stores_untrimmed_value() {
        let store = store();

        store.set("ru", "spells", "Heal", "  Лечение \n").unwrap();

        expect_that!(store.get("ru", "spells", "Heal"), some(eq("  Лечение \n")));
    }

    #[googletest::test]
    fn set_to_original_is_a_removal() {
        let store = store();

        store.set("ru", "spells", "Heal", "Heal").unwrap();

        expect_that!(store.get("ru", "spells", "Heal"), none());
        expect_that!(persisted(&store), eq("{}"));
    }

    #[googletest::test]
    fn set_to_padded_original_is_a_removal() {
        let store = store();
        store.set("ru", "spells", "Heal", "Лечение").unwrap();

        store.set("ru", "spells", "Heal", "  Heal  ").unwrap();

        expect_that!(store.get("ru", "spells", "Heal"), none());
    }

    #[googletest::test]
    fn blank_translation_deletes_and_prunes_parents() {
        let store = store();
        store.set("ru", "spells", "Heal", "Лечение").unwrap();

        store.set("ru", "spells", "Heal", "   ").unwrap();

        expect_that!(store.get("ru", "spells", "Heal"), none());
        expect_that!(persisted(&store), eq("{}"));
    }

    #[googletest::test]
    fn removal_keeps_sibling_entries() {
        let store = store();
        store.set("ru", "spells", "Heal", "Лечение").unwrap();
        store.set("ru", "spells", "Fireball", "Огненный шар").unwrap();
        store.set("ru", "feats", "Toughness", "Стойкость").unwrap();

        store.set("ru", "spells", "Heal", "").unwrap();

        expect_that!(
            persisted(&store),
            eq(r#"{"ru":{"feats":{"Toughness":"Стойкость"},"spells":{"Fireball":"Огненный шар"}}}"#)
        );
    }

    #[rstest]
    #[case("not json at all")]
    #[case("null")]
    #[case(r#"{"ru": "flat"}"#)]
    fn malformed_store_loads_empty(#[case] raw: &str) {
        let store = store();
        store.backend().set("pathbuilder_translations", raw).unwrap();

        assert!(store.load().is_empty());
        assert!(store.get("ru", "spells", "Heal").is_none());
    }

    #[googletest::test]
    fn set_recovers_from_malformed_store() {
        let store = store();
        store.backend().set("pathbuilder_translations", "{broken").unwrap();

        store.set("ru", "spells", "Heal", "Лечение").unwrap();

        expect_that!(store.get("ru", "spells", "Heal"), some(eq("Лечение")));
    }

    #[googletest::test]
    fn language_map_returns_one_language() {
        let store = store();
        store.set("ru", "spells", "Heal", "Лечение").unwrap();
        store.set("de", "spells", "Heal", "Heilen").unwrap();

        let map = store.language_map("ru");

        expect_that!(map, eq(&translations(&[("spells", &[("Heal", "Лечение")])])));
        expect_that!(store.language_map("fr").len(), eq(0));
    }

    #[googletest::test]
    fn replace_language_is_wholesale() {
        let store = store();
        store.set("ru", "spells", "Heal", "Лечение").unwrap();
        store.set("de", "spells", "Heal", "Heilen").unwrap();

        let kept = store
            .replace_language(
                "ru",
                translations(&[
                    ("feats", &[("Toughness", "Стойкость"), ("Blank", "  ")]),
                    ("empty", &[("Same", "Same")]),
                ]),
            )
            .unwrap();

        expect_that!(kept, eq(1));
        expect_that!(store.get("ru", "spells", "Heal"), none());
        expect_that!(store.get("ru", "feats", "Toughness"), some(eq("Стойкость")));
        expect_that!(store.get("de", "spells", "Heal"), some(eq("Heilen")));
        expect_that!(store.language_map("ru").contains_key("empty"), eq(false));
    }

    #[googletest::test]
    fn replace_language_with_nothing_removes_language() {
        let store = store();
        store.set("ru", "spells", "Heal", "Лечение").unwrap();

        store.replace_language("ru", TranslationMap::new()).unwrap();

        expect_that!(persisted(&store), eq("{}"));
    }

    #[rstest]
    #[case(None, "en")]
    #[case(Some(""), "en")]
    #[case(Some("ru"), "ru")]
    #[case(Some(" de\n"), "de")]
    fn current_language_falls_back_to_default(#[case] stored: Option<&str>, #[case] expected: &str) {
        let store = store();
        if let Some(code) = stored {
            store.backend().set("pathbuilder_lang", code).unwrap();
        }

        assert_eq!(store.current_language(), expected);
    }

    #[googletest::test]
    fn set_current_language_persists() {
        let store = store();

        store.set_current_language("ru").unwrap();

        expect_that!(store.current_language(), eq("ru"));
    }

    #[rstest]
    #[case("Heal", "Лечение", true)]
    #[case("Heal", "", false)]
    #[case("Heal", " \t ", false)]
    #[case("Heal", " Heal ", false)]
    #[case(" Heal", " Heal", true)]
    fn test_is_storable(#[case] original: &str, #[case] translated: &str, #[case] expected: bool) {
        assert_eq!(is_storable(original, translated), expected);
    }
}
