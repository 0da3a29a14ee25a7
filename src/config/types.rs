use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::policy::ColumnPolicy;
use crate::store::StoreKeys;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languages[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslatorSettings {
    /// Dataset ids to load originals for.
    pub datasets: Vec<String>,

    /// Languages translations can be edited for.
    pub languages: Vec<String>,
    /// Source language of the datasets; also the active language when none is stored.
    pub default_language: String,

    pub storage: StorageConfig,

    /// Glob patterns of tables left out of listings. Hidden tables are still patched.
    pub hidden_tables: Vec<String>,

    /// Columns open for translation.
    ///
    /// - `None`: every column (default)
    /// - `Some([...])`: only the named columns
    pub translatable_columns: Option<Vec<String>>,

    /// Also restrict the apply pass to `translatableColumns`.
    /// Off by default: cells are matched by text in every column.
    pub restrict_patch_to_columns: bool,

    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    /// Key of the translation catalog in the state store.
    pub translations_key: String,
    /// Key of the active language in the state store.
    pub language_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let keys = StoreKeys::default();
        Self { translations_key: keys.translations, language_key: keys.language }
    }
}

/// Directories, relative to the workspace root unless absolute.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathsConfig {
    /// Original dataset blobs (`<id>.txt`).
    pub data_dir: PathBuf,
    /// Host application's dataset store (`<id>.txt`).
    pub host_dir: PathBuf,
    /// Key-value state (translations, active language).
    pub state_dir: PathBuf,
    /// Translation bundles (`<lang>.json`).
    pub bundles_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            host_dir: PathBuf::from("host"),
            state_dir: PathBuf::from(".pb-translator"),
            bundles_dir: PathBuf::from("translations"),
        }
    }
}

impl PathsConfig {
    /// Resolve every directory against `root`.
    #[must_use]
    pub fn resolve(&self, root: &Path) -> Self {
        Self {
            data_dir: root.join(&self.data_dir),
            host_dir: root.join(&self.host_dir),
            state_dir: root.join(&self.state_dir),
            bundles_dir: root.join(&self.bundles_dir),
        }
    }
}

impl TranslatorSettings {
    /// # Errors
    /// - Required field is empty
    /// - Duplicate language code
    /// - Invalid glob pattern
    /// - Store key unusable as a file name
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.datasets.is_empty() {
            errors.push(ValidationError::new(
                "datasets",
                "At least one dataset is required. Example: [\"data123\"]",
            ));
        }

        for (index, id) in self.datasets.iter().enumerate() {
            if let Some(message) = file_name_problem(id) {
                errors.push(ValidationError::new(format!("datasets[{index}]"), message));
            }
        }

        if self.languages.is_empty() {
            errors.push(ValidationError::new(
                "languages",
                "At least one language is required. Example: [\"ru\"]",
            ));
        }

        let mut seen = HashSet::new();
        for (index, lang) in self.languages.iter().enumerate() {
            if lang.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("languages[{index}]"),
                    "The language code cannot be empty",
                ));
            } else if !seen.insert(lang.as_str()) {
                errors.push(ValidationError::new(
                    format!("languages[{index}]"),
                    format!("Duplicate language code '{lang}'"),
                ));
            }
        }

        if self.default_language.trim().is_empty() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The language code cannot be empty. Example: \"en\"",
            ));
        }

        if let Some(message) = file_name_problem(&self.storage.translations_key) {
            errors.push(ValidationError::new("storage.translationsKey", message));
        }
        if let Some(message) = file_name_problem(&self.storage.language_key) {
            errors.push(ValidationError::new("storage.languageKey", message));
        }
        if self.storage.translations_key == self.storage.language_key {
            errors.push(ValidationError::new(
                "storage.languageKey",
                "Must differ from 'storage.translationsKey'",
            ));
        }

        for (index, pattern) in self.hidden_tables.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("hiddenTables[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if let Some(columns) = &self.translatable_columns
            && columns.is_empty()
        {
            errors.push(ValidationError::new(
                "translatableColumns",
                "The list cannot be empty. Remove this field to allow every column",
            ));
        }

        if self.restrict_patch_to_columns && self.translatable_columns.is_none() {
            errors.push(ValidationError::new(
                "restrictPatchToColumns",
                "Requires 'translatableColumns' to be set",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Store keys derived from these settings.
    #[must_use]
    pub fn store_keys(&self) -> StoreKeys {
        StoreKeys {
            translations: self.storage.translations_key.clone(),
            language: self.storage.language_key.clone(),
            default_language: self.default_language.clone(),
        }
    }

    #[must_use]
    pub fn column_policy(&self) -> ColumnPolicy {
        ColumnPolicy::from_setting(self.translatable_columns.as_deref())
    }

    /// Languages offered for selection: editable languages, then the default.
    #[must_use]
    pub fn selectable_languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();
        if !languages.contains(&self.default_language.as_str()) {
            languages.push(&self.default_language);
        }
        languages
    }
}

/// Why `name` can't be used as a single file name, if it can't.
fn file_name_problem(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("The value cannot be empty")
    } else if name == "." || name == ".." || name.contains(['/', '\\']) {
        Some("The value must be a plain name without path separators")
    } else {
        None
    }
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            datasets: vec!["data123".to_string(), "data_remastered61".to_string()],
            languages: vec!["ru".to_string()],
            default_language: "en".to_string(),
            storage: StorageConfig::default(),
            hidden_tables: vec!["sqlite_autoindex_*".to_string()],
            translatable_columns: None,
            restrict_patch_to_columns: false,
            paths: PathsConfig::default(),
        }
    }
}
