//! The translator: settings, stores and dataset cache wired together.

use std::path::{
    Path,
    PathBuf,
};

use crate::apply::{
    ApplyReport,
    apply_translations,
};
use crate::config::{
    ConfigManager,
    TranslatorSettings,
};
use crate::dataset::{
    BlobCodec,
    DatasetSource,
    DirectoryHostStore,
    DirectorySource,
    HostStore,
    LzBase64,
    OriginalCache,
    TableFilter,
};
use crate::error::{
    Error,
    Result,
};
use crate::policy::ColumnPolicy;
use crate::store::{
    FileStore,
    KeyValueStore,
    TranslationStore,
    bundle_path,
    read_bundle,
};
use crate::view::TableView;

/// Translator backed by directories under the workspace.
pub type FileTranslator = Translator<FileStore, DirectorySource, DirectoryHostStore, LzBase64>;

#[derive(Debug)]
pub struct Translator<S, D, H, C> {
    settings: TranslatorSettings,
    store: TranslationStore<S>,
    /// Where original blobs are fetched from
    source: D,
    /// Where patched blobs are written to
    host: H,
    codec: C,
    /// Originals, loaded on first use
    cache: OriginalCache,
    filter: TableFilter,
    policy: ColumnPolicy,
    /// Default directory for `<lang>.json` bundles
    bundles_dir: PathBuf,
}

impl FileTranslator {
    /// Build a translator from loaded settings, resolving every directory
    /// against the workspace root.
    ///
    /// # Errors
    /// A hidden-table pattern is not a valid glob.
    pub fn from_config(config: &ConfigManager) -> Result<Self> {
        let paths = config.resolved_paths();

        Self::new(
            config.get_settings().clone(),
            FileStore::new(paths.state_dir),
            DirectorySource::new(paths.data_dir),
            DirectoryHostStore::new(paths.host_dir),
            LzBase64,
            paths.bundles_dir,
        )
    }
}

impl<S, D, H, C> Translator<S, D, H, C>
where
    S: KeyValueStore,
    D: DatasetSource,
    H: HostStore,
    C: BlobCodec,
{
    /// # Errors
    /// A hidden-table pattern is not a valid glob.
    pub fn new(
        settings: TranslatorSettings,
        backend: S,
        source: D,
        host: H,
        codec: C,
        bundles_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let filter = TableFilter::new(&settings.hidden_tables)?;
        let policy = settings.column_policy();
        let store = TranslationStore::new(backend, settings.store_keys());

        Ok(Self {
            settings,
            store,
            source,
            host,
            codec,
            cache: OriginalCache::new(),
            filter,
            policy,
            bundles_dir: bundles_dir.into(),
        })
    }

    #[must_use]
    pub const fn settings(&self) -> &TranslatorSettings {
        &self.settings
    }

    #[must_use]
    pub const fn store(&self) -> &TranslationStore<S> {
        &self.store
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub const fn cache(&self) -> &OriginalCache {
        &self.cache
    }

    #[must_use]
    pub const fn policy(&self) -> &ColumnPolicy {
        &self.policy
    }

    #[must_use]
    pub fn current_language(&self) -> String {
        self.store.current_language()
    }

    #[must_use]
    pub fn translation(&self, lang: &str, table: &str, original: &str) -> Option<String> {
        self.store.get(lang, table, original)
    }

    /// Store or clear one translation.
    ///
    /// # Errors
    /// - `lang` is not an editable language
    /// - The store could not be written
    pub fn set_translation(
        &self,
        lang: &str,
        table: &str,
        original: &str,
        translated: &str,
    ) -> Result<()> {
        self.check_editable(lang)?;
        Ok(self.store.set(lang, table, original, translated)?)
    }

    /// Make `lang` the active language and re-apply translations to the host.
    ///
    /// # Errors
    /// - `lang` is not a selectable language
    /// - Storing the language or the apply pass failed
    pub async fn switch_language(&mut self, lang: &str) -> Result<ApplyReport> {
        self.check_selectable(lang)?;
        self.store.set_current_language(lang)?;
        tracing::info!(lang, "Switched active language");
        self.apply().await
    }

    /// Load every configured dataset not cached yet.
    ///
    /// # Errors
    /// Any configured dataset fails to fetch or decode; nothing is cached then.
    pub async fn ensure_loaded(&mut self) -> Result<()> {
        let missing: Vec<String> = self
            .settings
            .datasets
            .iter()
            .filter(|id| !self.cache.contains(id))
            .cloned()
            .collect();
        if missing.is_empty() {
            return Ok(());
        }

        self.cache.load_all(&self.source, &self.codec, &missing).await?;
        Ok(())
    }

    /// Load dataset `id` unless it is already cached.
    ///
    /// # Errors
    /// - `id` is not a configured dataset
    /// - Fetch or decode failure
    pub async fn load_dataset(&mut self, id: &str) -> Result<()> {
        if !self.settings.datasets.iter().any(|known| known == id) {
            return Err(Error::UnknownDataset(id.to_string()));
        }
        if !self.cache.contains(id) {
            self.cache.load(&self.source, &self.codec, id).await?;
        }
        Ok(())
    }

    /// Visible tables of dataset `id`, sorted by name.
    ///
    /// # Errors
    /// See [`load_dataset`](Self::load_dataset).
    pub async fn tables(&mut self, id: &str) -> Result<Vec<String>> {
        self.load_dataset(id).await?;
        let Some(collection) = self.cache.get(id) else {
            return Err(Error::UnknownDataset(id.to_string()));
        };

        Ok(self.filter.visible_tables(collection).into_iter().map(str::to_string).collect())
    }

    /// Grid view of the original text of `table` in dataset `id`.
    ///
    /// # Errors
    /// - See [`load_dataset`](Self::load_dataset)
    /// - The dataset has no such table
    pub async fn view(&mut self, id: &str, table: &str) -> Result<TableView> {
        self.load_dataset(id).await?;
        let csv_text = self
            .cache
            .get(id)
            .and_then(|collection| collection.get(table))
            .ok_or_else(|| Error::UnknownTable { dataset: id.to_string(), table: table.to_string() })?;

        Ok(TableView::new(table, csv_text, &self.policy))
    }

    /// Replace every translation of `lang` with the bundle at `path`, or at
    /// `<bundlesDir>/<lang>.json` when no path is given.
    ///
    /// Returns the number of entries kept.
    ///
    /// # Errors
    /// - `lang` is not an editable language
    /// - The bundle could not be read or parsed
    /// - The store could not be written
    pub async fn import_bundle(&self, lang: &str, path: Option<&Path>) -> Result<usize> {
        self.check_editable(lang)?;
        let path = path.map_or_else(|| bundle_path(&self.bundles_dir, lang), Path::to_path_buf);

        let map = read_bundle(&path).await?;
        Ok(self.store.replace_language(lang, map)?)
    }

    /// Patch every host dataset with the active language's translations.
    ///
    /// # Errors
    /// Loading originals or the apply pass failed.
    pub async fn apply(&mut self) -> Result<ApplyReport> {
        self.ensure_loaded().await?;

        let lang = self.current_language();
        let translations = self.store.language_map(&lang);
        let policy = self.settings.restrict_patch_to_columns.then_some(&self.policy);
        tracing::debug!(lang = %lang, tables = translations.len(), "Applying translations");

        Ok(apply_translations(&self.host, &self.cache, &self.codec, &translations, policy).await?)
    }

    /// Languages that can be switched to: editable ones and the default.
    fn check_selectable(&self, lang: &str) -> Result<()> {
        if self.settings.selectable_languages().contains(&lang) {
            Ok(())
        } else {
            Err(Error::UnknownLanguage(lang.to_string()))
        }
    }

    /// Languages that hold translations. The default language never does.
    fn check_editable(&self, lang: &str) -> Result<()> {
        if self.settings.languages.iter().any(|editable| editable == lang) {
            Ok(())
        } else {
            Err(Error::UnknownLanguage(lang.to_string()))
        }
    }
}
