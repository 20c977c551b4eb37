//! 画像受付の結合テスト
//!
//! 実際のJPEG/PNG/WEBPファイルを生成し、プレビュー用Data URIから
//! 送信ペイロードまでバイト列が変わらないことを確認する

use deepfake_detector::intake::load_file;
use deepfake_detector_common::{
    decode_data_uri, prepare_analysis, select_file, DetectionMethod, IntakeLimits, Prepared,
    ValidationError,
};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;
use tempfile::tempdir;

fn encode_fixture(format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(32, 24, |x, y| Rgb([(x * 8) as u8, (y * 10) as u8, 128]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, format).expect("画像のエンコードに失敗");
    bytes.into_inner()
}

fn write_fixture(dir: &Path, name: &str, format: ImageFormat) -> Vec<u8> {
    let bytes = encode_fixture(format);
    std::fs::write(dir.join(name), &bytes).unwrap();
    bytes
}

#[test]
fn test_accepted_formats_survive_round_trip() {
    let dir = tempdir().unwrap();
    let cases = [
        ("face.jpg", ImageFormat::Jpeg, "image/jpeg"),
        ("face.png", ImageFormat::Png, "image/png"),
        ("face.webp", ImageFormat::WebP, "image/webp"),
    ];

    for (name, format, mime) in cases {
        let original = write_fixture(dir.path(), name, format);
        let file = load_file(&dir.path().join(name)).unwrap();
        assert_eq!(file.mime_type, mime);

        let upload = select_file(&file, &IntakeLimits::default()).unwrap();
        assert_eq!(upload.file_name, name);
        let uri = upload.image_data_uri.clone().unwrap();
        assert!(uri.starts_with(&format!("data:{};base64,", mime)));

        let decoded = decode_data_uri(&uri).unwrap();
        assert_eq!(decoded.bytes, original, "{}: Data URIから元のバイト列に戻るべき", name);

        match prepare_analysis(&upload, DetectionMethod::Basic).unwrap() {
            Prepared::Ready(request) => {
                assert_eq!(request.file_name, name);
                assert_eq!(request.mime_type, mime);
                assert_eq!(request.bytes, original);
                assert_eq!(request.method, DetectionMethod::Basic);
            }
            Prepared::Aborted(result) => panic!("{}: 送信が中断された: {:?}", name, result),
        }
    }
}

#[test]
fn test_gif_is_rejected() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("anim.gif"), b"GIF89a\x01\x00\x01\x00").unwrap();

    let file = load_file(&dir.path().join("anim.gif")).unwrap();
    let err = select_file(&file, &IntakeLimits::default()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnsupportedType {
            mime_type: "image/gif".into()
        }
    );
}

#[test]
fn test_text_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "not an image").unwrap();

    let file = load_file(&path).unwrap();
    let err = select_file(&file, &IntakeLimits::default()).unwrap_err();
    assert!(matches!(err, ValidationError::UnsupportedType { .. }));
}

/// 上限ちょうどは受け付け、1バイト超過は拒否する
#[test]
fn test_size_limit_boundary() {
    let dir = tempdir().unwrap();
    let limits = IntakeLimits::with_max_bytes(4096);

    let at_limit = dir.path().join("at_limit.png");
    std::fs::write(&at_limit, vec![0u8; 4096]).unwrap();
    assert!(select_file(&load_file(&at_limit).unwrap(), &limits).is_ok());

    let over_limit = dir.path().join("over_limit.png");
    std::fs::write(&over_limit, vec![0u8; 4097]).unwrap();
    let err = select_file(&load_file(&over_limit).unwrap(), &limits).unwrap_err();
    assert!(matches!(err, ValidationError::TooLarge { size_bytes: 4097, .. }));
}
