//! ワークスペース設定の読み込みとパス解決

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    PathsConfig,
    TranslatorSettings,
    loader,
};

/// 検証済みの設定と、その読み込み元ワークスペース
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 検証済みの設定
    settings: TranslatorSettings,

    /// 相対パスの基準ディレクトリ（未読み込みならカレントディレクトリ）
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    /// デフォルト設定で作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `.pb-translator.json` を読み込んで検証する
    ///
    /// ファイルがなければデフォルト設定を使う。検証に失敗した場合は
    /// 現在の設定もワークスペースも変更しない。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー（全項目をまとめて返す）
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        let settings = match &workspace_root {
            Some(root) => loader::load_from_workspace(root)?.unwrap_or_default(),
            None => TranslatorSettings::default(),
        };
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(
            workspace = ?workspace_root,
            datasets = ?settings.datasets,
            languages = ?settings.languages,
            "Settings loaded"
        );
        self.settings = settings;
        self.workspace_root = workspace_root;
        Ok(())
    }

    /// 現在の設定
    #[must_use]
    pub const fn get_settings(&self) -> &TranslatorSettings {
        &self.settings
    }

    /// データ・ホスト・状態・バンドルの各ディレクトリをワークスペース基準で解決
    #[must_use]
    pub fn resolved_paths(&self) -> PathsConfig {
        let root = self.workspace_root.as_deref().unwrap_or_else(|| Path::new(""));
        self.settings.paths.resolve(root)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// new: パスは相対のまま
    #[rstest]
    fn test_new_keeps_relative_paths() {
        let manager = ConfigManager::new();

        assert_eq!(manager.get_settings().default_language, "en");
        assert_eq!(manager.resolved_paths().data_dir, PathBuf::from("data"));
    }

    /// load_settings: ワークスペースなしはデフォルト設定
    #[rstest]
    fn test_load_settings_without_workspace() {
        let mut manager = ConfigManager::new();

        manager.load_settings(None).unwrap();

        assert_eq!(manager.get_settings().languages, vec!["ru".to_string()]);
        assert_eq!(manager.resolved_paths().host_dir, PathBuf::from("host"));
    }

    /// load_settings: 設定ファイルの値とディレクトリが反映される
    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"defaultLanguage": "de", "paths": {"hostDir": "/srv/host"}}"#;
        fs::write(temp_dir.path().join(".pb-translator.json"), config_content).unwrap();

        let mut manager = ConfigManager::new();
        manager.load_settings(Some(temp_dir.path().to_path_buf())).unwrap();

        let paths = manager.resolved_paths();
        assert_eq!(manager.get_settings().default_language, "de");
        assert_eq!(paths.state_dir, temp_dir.path().join(".pb-translator"));
        assert_eq!(paths.host_dir, PathBuf::from("/srv/host"));
    }

    /// load_settings: 設定ファイルがない場合はデフォルト値
    #[rstest]
    fn test_load_settings_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let mut manager = ConfigManager::new();
        manager.load_settings(Some(temp_dir.path().to_path_buf())).unwrap();

        assert_eq!(manager.get_settings().default_language, "en");
        assert_eq!(manager.resolved_paths().data_dir, temp_dir.path().join("data"));
    }

    /// load_settings: 無効な設定では以前の状態を保つ
    #[rstest]
    fn test_load_settings_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".pb-translator.json"), r#"{"languages": []}"#).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert_eq!(manager.get_settings().languages, vec!["ru".to_string()]);
        assert_eq!(manager.resolved_paths().data_dir, PathBuf::from("data"));
    }
}
