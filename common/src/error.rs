//! エラー型定義

use thiserror::Error;

const MIB: u64 = 1024 * 1024;

/// サイズ上限の表示（`10MB` / `0.5MB` / `512 bytes`）
pub fn format_size_limit(bytes: u64) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        return format!("{}MB", bytes / MIB);
    }
    let megabytes = bytes as f64 / MIB as f64;
    if megabytes < 0.01 {
        return format!("{} bytes", bytes);
    }
    let text = format!("{:.2}", megabytes);
    format!("{}MB", text.trim_end_matches('0').trim_end_matches('.'))
}

/// アップロード受付時の検証エラー（ネットワーク送信前に検出）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid file type ({mime_type}). Please upload JPG, PNG, or WEBP.")]
    UnsupportedType { mime_type: String },

    #[error("File size exceeds {} limit.", format_size_limit(*limit_bytes))]
    TooLarge { size_bytes: u64, limit_bytes: u64 },

    #[error("Error reading file: {0}")]
    ReadFailure(String),

    #[error("Please upload an image first.")]
    MissingImage,
}

/// ディスパッチャ呼び出しが送信前に打ち切られた理由
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// 同じ操作のリクエストが処理中（呼び出しは何もしない）
    #[error("A request is already in flight")]
    Busy,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// ワークフロー状態遷移のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Analysis in progress")]
    Busy,

    #[error("No analysis in progress")]
    NotAnalyzing,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Data URI error: {0}")]
    DataUri(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_data_uri() {
        let error = Error::DataUri("missing comma".to_string());
        assert_eq!(format!("{}", error), "Data URI error: missing comma");
    }

    #[test]
    fn test_too_large_message_uses_megabytes() {
        let error = ValidationError::TooLarge {
            size_bytes: 11 * 1024 * 1024,
            limit_bytes: 10 * 1024 * 1024,
        };
        assert_eq!(error.to_string(), "File size exceeds 10MB limit.");
    }

    #[test]
    fn test_too_large_message_below_one_megabyte() {
        let error = ValidationError::TooLarge {
            size_bytes: 600 * 1024,
            limit_bytes: 512 * 1024,
        };
        assert_eq!(error.to_string(), "File size exceeds 0.5MB limit.");

        let error = ValidationError::TooLarge {
            size_bytes: 9,
            limit_bytes: 8,
        };
        assert_eq!(error.to_string(), "File size exceeds 8 bytes limit.");
    }

    #[test]
    fn test_format_size_limit() {
        assert_eq!(format_size_limit(5 * MIB), "5MB");
        assert_eq!(format_size_limit(MIB + MIB / 4), "1.25MB");
        assert_eq!(format_size_limit(MIB / 10), "0.1MB");
        assert_eq!(format_size_limit(0), "0 bytes");
    }

    #[test]
    fn test_unsupported_type_mentions_mime() {
        let error = ValidationError::UnsupportedType {
            mime_type: "image/gif".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("image/gif"));
        assert!(display.contains("JPG, PNG, or WEBP"));
    }

    #[test]
    fn test_dispatch_error_is_transparent_over_validation() {
        let error: DispatchError = ValidationError::MissingImage.into();
        assert_eq!(error.to_string(), "Please upload an image first.");
        assert!(matches!(error, DispatchError::Validation(ValidationError::MissingImage)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("テスト"));
    }
}
