//! 解析APIへのリクエスト準備
//!
//! エンドポイントURLの組み立てと、保持中のData URIから
//! multipartに載せるペイロードへの変換を行う。

use crate::error::ValidationError;
use crate::intake::decode_data_uri;
use crate::types::{AnalysisResult, DetectionMethod, UploadState};

/// バックエンドURLのデフォルト（ローカル開発用）
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:7860";

/// Data URIを戻せなかった場合のメッセージ
pub const ENCODING_ERROR_MESSAGE: &str = "internal encoding error";

/// 解析APIの接続先
///
/// 環境変数などは読まず、生成時に注入する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn analyze_url(&self) -> String {
        format!("{}/analyze", self.base_url)
    }

    pub fn contact_url(&self) -> String {
        format!("{}/contact-message", self.base_url)
    }

    pub fn health_url(&self) -> String {
        format!("{}/", self.base_url)
    }
}

/// multipartで送る内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub method: DetectionMethod,
}

/// 送信準備の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    /// 送信可能
    Ready(AnalysisRequest),
    /// 送信せずに結果が確定した（エンコード失敗）
    Aborted(AnalysisResult),
}

/// 保持中の画像から送信ペイロードを作る
///
/// 画像がなければ検証エラー。Data URIが壊れていれば
/// ネットワークに出ずに `internal encoding error` で確定する。
pub fn prepare_analysis(
    upload: &UploadState,
    method: DetectionMethod,
) -> Result<Prepared, ValidationError> {
    let data_uri = upload
        .image_data_uri
        .as_deref()
        .ok_or(ValidationError::MissingImage)?;

    match decode_data_uri(data_uri) {
        Ok(decoded) => Ok(Prepared::Ready(AnalysisRequest {
            file_name: upload.file_name.clone(),
            mime_type: decoded.mime_type,
            bytes: decoded.bytes,
            method,
        })),
        Err(e) => {
            log::error!("failed to decode preview for {}: {}", upload.file_name, e);
            Ok(Prepared::Aborted(AnalysisResult::failure(ENCODING_ERROR_MESSAGE)))
        }
    }
}
