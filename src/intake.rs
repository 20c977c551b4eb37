use deepfake_detector_common::{SelectedFile, ValidationError};
use image::ImageFormat;
use std::path::Path;

/// 形式が判別できないファイルのMIMEタイプ（受付で弾かれる）
const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// 拡張子からMIMEタイプを決める
pub fn mime_type_for(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MIME_TYPE)
}

/// ファイルを読み込んで受付前のファイルにする
///
/// 種類・サイズの検証はワークフロー側で行う。
pub fn load_file(path: &Path) -> Result<SelectedFile, ValidationError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ValidationError::ReadFailure(format!("{}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| deepfake_detector_common::types::DEFAULT_FILE_NAME.to_string());

    Ok(SelectedFile::new(file_name, mime_type_for(path), bytes))
}
