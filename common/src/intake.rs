//! アップロード受付
//!
//! ファイルの種類・サイズを検証し、プレビュー用のData URIに変換する。
//! Data URIは送信時に元のバイト列へ戻す（往復でバイト単位に一致する）。

use crate::error::{Error, Result, ValidationError};
use crate::types::UploadState;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// 受け付けるMIMEタイプ
pub const ACCEPTED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// デフォルトのサイズ上限（10MB）
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// ピッカー/ドロップ/ファイルシステムから渡されたファイル（未検証）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// 受付条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeLimits {
    pub max_bytes: u64,
    pub accepted_mime_types: Vec<String>,
}

impl Default for IntakeLimits {
    fn default() -> Self {
        Self::with_max_bytes(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

impl IntakeLimits {
    pub fn with_max_bytes(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            accepted_mime_types: ACCEPTED_MIME_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_max_megabytes(megabytes: u64) -> Self {
        Self::with_max_bytes(megabytes * 1024 * 1024)
    }

    pub fn accepts(&self, mime_type: &str) -> bool {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        self.accepted_mime_types.iter().any(|m| *m == mime_type)
    }

    /// `<input accept=...>` 用の文字列
    pub fn accept_attribute(&self) -> String {
        self.accepted_mime_types.join(", ")
    }
}

/// 種類・サイズを検証する
///
/// サイズ超過はMIMEタイプに関係なくサイズエラーになる。
pub fn validate(file: &SelectedFile, limits: &IntakeLimits) -> std::result::Result<(), ValidationError> {
    validate_metadata(file.size(), &file.mime_type, limits)
}

/// 中身を読む前にサイズとMIMEタイプだけで検証する
///
/// ブラウザでは `File.size` / `File.type` で先に弾き、大きなファイルを
/// メモリに読み込まない。
pub fn validate_metadata(
    size_bytes: u64,
    mime_type: &str,
    limits: &IntakeLimits,
) -> std::result::Result<(), ValidationError> {
    if size_bytes > limits.max_bytes {
        return Err(ValidationError::TooLarge {
            size_bytes,
            limit_bytes: limits.max_bytes,
        });
    }

    if !limits.accepts(mime_type) {
        return Err(ValidationError::UnsupportedType {
            mime_type: mime_type.to_string(),
        });
    }

    Ok(())
}

/// ファイルを検証してプレビュー状態を作る
pub fn select_file(
    file: &SelectedFile,
    limits: &IntakeLimits,
) -> std::result::Result<UploadState, ValidationError> {
    validate(file, limits)?;
    let data_uri = encode_data_uri(&file.mime_type.to_ascii_lowercase(), &file.bytes);
    log::debug!("accepted {} ({} bytes)", file.file_name, file.size());
    Ok(UploadState::new(file.file_name.clone(), data_uri))
}

/// バイト列を `data:<mime>;base64,<payload>` 形式にする
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Data URIをデコードした画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Data URIを元のバイト列に戻す
///
/// # Examples
/// ```
/// use deepfake_detector_common::intake::{decode_data_uri, encode_data_uri};
///
/// let uri = encode_data_uri("image/png", &[0x89, b'P', b'N', b'G']);
/// let decoded = decode_data_uri(&uri).unwrap();
/// assert_eq!(decoded.mime_type, "image/png");
/// assert_eq!(decoded.bytes, vec![0x89, b'P', b'N', b'G']);
/// ```
pub fn decode_data_uri(data_uri: &str) -> Result<DecodedImage> {
    let rest = data_uri
        .strip_prefix("data:")
        .ok_or_else(|| Error::DataUri("missing data: prefix".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::DataUri("missing comma".into()))?;

    let mut params = header.split(';');
    let mime_type = params.next().unwrap_or_default().trim();
    if mime_type.is_empty() {
        return Err(Error::DataUri("missing MIME type".into()));
    }
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(Error::DataUri("payload is not base64".into()));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::DataUri(format!("invalid base64: {}", e)))?;

    Ok(DecodedImage {
        mime_type: mime_type.to_string(),
        bytes,
    })
}
