use crate::error::{DetectorError, Result};
use deepfake_detector_common::request::DEFAULT_API_BASE_URL;
use deepfake_detector_common::{ApiConfig, DetectionMethod, IntakeLimits, SourceLabels};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 接続先を上書きする環境変数（優先順）
pub const API_BASE_URL_ENV_VARS: &[&str] = &["DEEPFAKE_API_BASE_URL", "API_BASE_URL"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub max_upload_mb: u64,
    pub default_method: DetectionMethod,
    /// ソースタグ → 表示名の追加分
    pub source_labels: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            max_upload_mb: 10,
            default_method: DetectionMethod::Advanced,
            source_labels: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DetectorError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("deepfake-detector").join("config.json"))
    }

    /// 接続先URLを決める
    ///
    /// コマンドライン引数 > 環境変数 > 設定ファイル > デフォルト
    pub fn resolve_api_base_url<F>(&self, flag: Option<&str>, env: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |s: &str| !s.trim().is_empty();

        if let Some(url) = flag.filter(|s| non_blank(s)) {
            return url.to_string();
        }
        for name in API_BASE_URL_ENV_VARS.iter().copied() {
            if let Some(url) = env(name).filter(|s| non_blank(s)) {
                return url;
            }
        }
        self.api_base_url
            .clone()
            .filter(|s| non_blank(s))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    /// プロセス環境を参照して接続先を作る
    pub fn api_config(&self, flag: Option<&str>) -> ApiConfig {
        ApiConfig::new(self.resolve_api_base_url(flag, |name| std::env::var(name).ok()))
    }

    pub fn intake_limits(&self) -> IntakeLimits {
        IntakeLimits::with_max_megabytes(self.max_upload_mb)
    }

    pub fn source_labels(&self) -> SourceLabels {
        SourceLabels::with_overrides(self.source_labels.clone())
    }

    pub fn set_api_base_url(&mut self, url: String) -> Result<()> {
        self.api_base_url = Some(url);
        self.save()
    }

    pub fn set_max_upload_mb(&mut self, megabytes: u64) -> Result<()> {
        if megabytes == 0 {
            return Err(DetectorError::Config("upload limit must be at least 1MB".into()));
        }
        self.max_upload_mb = megabytes;
        self.save()
    }

    pub fn set_default_method(&mut self, method: DetectionMethod) -> Result<()> {
        self.default_method = method;
        self.save()
    }
}
