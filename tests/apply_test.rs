//! End-to-end tests of the file-backed translator

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::fs;
use std::path::Path;

use pb_translator::FileTranslator;
use pb_translator::config::ConfigManager;
use pb_translator::dataset::{
    LzBase64,
    decode_collection,
    encode_collection,
};
use pb_translator::types::DatasetCollection;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const SPELLS: &str = "name,traditions\nFireball,\"arcane,primal\"\nHeal,divine";

/// Workspace with one dataset blob, an empty host entry and `config` as settings.
fn workspace(config: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join(".pb-translator.json"), config).unwrap();

    let original: DatasetCollection = [
        ("spells".to_string(), SPELLS.to_string()),
        ("sqlite_autoindex_spells_1".to_string(), "name\nHeal".to_string()),
    ]
    .into_iter()
    .collect();
    fs::create_dir_all(root.join("data")).unwrap();
    fs::write(root.join("data/data123.txt"), encode_collection(&LzBase64, &original).unwrap())
        .unwrap();

    fs::create_dir_all(root.join("host")).unwrap();
    fs::write(root.join("host/data123.txt"), "").unwrap();
    temp_dir
}

fn translator(root: &Path) -> FileTranslator {
    let mut config = ConfigManager::new();
    config.load_settings(Some(root.to_path_buf())).unwrap();
    FileTranslator::from_config(&config).unwrap()
}

fn host_collection(root: &Path) -> DatasetCollection {
    let blob = fs::read_to_string(root.join("host/data123.txt")).unwrap();
    decode_collection(&LzBase64, "data123", &blob).unwrap()
}

#[tokio::test]
async fn test_switch_language_writes_patched_blob() {
    let temp_dir = workspace(r#"{"datasets": ["data123"]}"#);
    let mut translator = translator(temp_dir.path());
    translator.set_translation("ru", "spells", "Heal", "Лечение").unwrap();
    translator.set_translation("ru", "sqlite_autoindex_spells_1", "Heal", "Лечение").unwrap();

    let report = translator.switch_language("ru").await.unwrap();

    assert_eq!(report.patched, vec!["data123".to_string()]);
    let host = host_collection(temp_dir.path());
    assert_eq!(
        host["spells"],
        "\"name\",\"traditions\"\n\"Fireball\",\"arcane,primal\"\n\"Лечение\",\"divine\""
    );
    assert_eq!(host["sqlite_autoindex_spells_1"], "\"name\"\n\"Лечение\"");
}

#[tokio::test]
async fn test_hidden_tables_are_not_listed() {
    let temp_dir = workspace(r#"{"datasets": ["data123"]}"#);
    let mut translator = translator(temp_dir.path());

    let tables = translator.tables("data123").await.unwrap();

    assert_eq!(tables, vec!["spells".to_string()]);
}

#[tokio::test]
async fn test_reapply_is_idempotent() {
    let temp_dir = workspace(r#"{"datasets": ["data123"]}"#);
    let mut translator = translator(temp_dir.path());
    translator.set_translation("ru", "spells", "Fireball", "Огненный шар").unwrap();
    translator.switch_language("ru").await.unwrap();
    let first = fs::read_to_string(temp_dir.path().join("host/data123.txt")).unwrap();

    translator.apply().await.unwrap();

    let second = fs::read_to_string(temp_dir.path().join("host/data123.txt")).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_state_survives_new_translator() {
    let temp_dir = workspace(r#"{"datasets": ["data123"]}"#);
    {
        let mut translator = translator(temp_dir.path());
        translator.set_translation("ru", "spells", "Heal", "Лечение").unwrap();
        translator.switch_language("ru").await.unwrap();
    }

    let translator = translator(temp_dir.path());

    assert_eq!(translator.current_language(), "ru");
    assert_eq!(translator.translation("ru", "spells", "Heal"), Some("Лечение".to_string()));
}

#[tokio::test]
async fn test_bundle_import_replaces_language() {
    let temp_dir = workspace(r#"{"datasets": ["data123"]}"#);
    let bundles = temp_dir.path().join("translations");
    fs::create_dir_all(&bundles).unwrap();
    fs::write(bundles.join("ru.json"), r#"{"spells": {"Fireball": "Огненный шар"}}"#).unwrap();
    let translator = translator(temp_dir.path());
    translator.set_translation("ru", "spells", "Heal", "Лечение").unwrap();

    let kept = translator.import_bundle("ru", None).await.unwrap();

    assert_eq!(kept, 1);
    assert_eq!(translator.translation("ru", "spells", "Heal"), None);
    assert_eq!(
        translator.translation("ru", "spells", "Fireball"),
        Some("Огненный шар".to_string())
    );
}

#[tokio::test]
async fn test_restricted_patch_leaves_other_columns() {
    let temp_dir = workspace(
        r#"{
            "datasets": ["data123"],
            "translatableColumns": ["traditions"],
            "restrictPatchToColumns": true
        }"#,
    );
    let mut translator = translator(temp_dir.path());
    translator.set_translation("ru", "spells", "Heal", "Лечение").unwrap();
    translator.set_translation("ru", "spells", "divine", "божественная").unwrap();

    translator.switch_language("ru").await.unwrap();

    let host = host_collection(temp_dir.path());
    assert_eq!(
        host["spells"],
        "\"name\",\"traditions\"\n\"Fireball\",\"arcane,primal\"\n\"Heal\",\"божественная\""
    );
}

#[tokio::test]
async fn test_custom_store_keys_are_used() {
    let temp_dir = workspace(
        r#"{"datasets": ["data123"], "storage": {"translationsKey": "tr", "languageKey": "lng"}}"#,
    );
    let translator = translator(temp_dir.path());

    translator.set_translation("ru", "spells", "Heal", "Лечение").unwrap();

    let state_dir = temp_dir.path().join(".pb-translator");
    assert!(state_dir.join("tr").exists());
    assert!(!state_dir.join("pathbuilder_translations").exists());
}
