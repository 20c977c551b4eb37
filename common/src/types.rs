//! 解析ワークフローの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - DetectionMethod: 検出方式タグ（サーバへ転送するだけ）
//! - UploadState: プレビュー用に保持する画像
//! - AnalysisResult: 1リクエストの最終結果（成功/失敗）
//! - ContactMessage: お問い合わせフォームの送信内容

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// アップロード前のデフォルトファイル名
pub const DEFAULT_FILE_NAME: &str = "uploaded_image";

/// 検出方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    Basic,
    #[default]
    Advanced,
}

impl DetectionMethod {
    /// multipartの`method`フィールドに載せる値
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMethod::Basic => "basic",
            DetectionMethod::Advanced => "advanced",
        }
    }

    /// 方式選択ボタンのラベル
    pub fn label(&self) -> &'static str {
        match self {
            DetectionMethod::Basic => "Basic Model",
            DetectionMethod::Advanced => "Advanced Model (API)",
        }
    }

    pub fn all() -> [DetectionMethod; 2] {
        [DetectionMethod::Basic, DetectionMethod::Advanced]
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" | "b" => Ok(DetectionMethod::Basic),
            "advanced" | "adv" | "a" => Ok(DetectionMethod::Advanced),
            _ => Err(format!("Unknown method: {}. Use basic or advanced", s)),
        }
    }
}

/// 選択中の画像
///
/// ワークフローが排他的に所有し、選択のたびに丸ごと置き換える。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadState {
    pub image_data_uri: Option<String>,
    pub file_name: String,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            image_data_uri: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl UploadState {
    pub fn new(file_name: impl Into<String>, image_data_uri: impl Into<String>) -> Self {
        Self {
            image_data_uri: Some(image_data_uri.into()),
            file_name: file_name.into(),
        }
    }

    pub fn has_image(&self) -> bool {
        self.image_data_uri.is_some()
    }
}

/// 解析結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum AnalysisResult {
    Success {
        is_ai: bool,
        confidence_percent: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source_tag: Option<String>,
    },
    Failure {
        message: String,
    },
}

impl AnalysisResult {
    pub fn failure(message: impl Into<String>) -> Self {
        AnalysisResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success { .. })
    }

    /// 失敗時のメッセージ
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            AnalysisResult::Failure { message } => Some(message),
            AnalysisResult::Success { .. } => None,
        }
    }
}

/// お問い合わせフォームの送信内容
///
/// クライアント側では形式チェックを行わない（空の名前もそのまま送る）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

/// お問い合わせ送信の結果（Ok: 成功メッセージ / Err: エラーメッセージ）
pub type ContactOutcome = std::result::Result<String, String>;
