use crate::error::{OcrError, Result};
use image::ImageFormat;
use omni_ocr_common::ImageInput;
use std::io::Read;
use std::path::Path;

/// 標準入力から読むときのパス指定
pub const STDIN_PATH: &str = "-";

/// 画像ファイル（または標準入力）を読み込む
pub fn load_image(path: &Path) -> Result<ImageInput> {
    if path.as_os_str() == STDIN_PATH {
        let mut data = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut data)
            .map_err(|e| OcrError::Encode(format!("failed to read stdin: {}", e)))?;
        return from_bytes("stdin", None, data);
    }

    if !path.is_file() {
        return Err(OcrError::Encode(format!("file not found: {}", path.display())));
    }

    let data = std::fs::read(path)
        .map_err(|e| OcrError::Encode(format!("{}: {}", path.display(), e)))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    from_bytes(&name, path.extension().and_then(|e| e.to_str()), data)
}

/// バイト列からImageInputを作成
///
/// MIMEタイプは中身から判定し、判定できなければ拡張子を使う
pub fn from_bytes(name: &str, extension: Option<&str>, data: Vec<u8>) -> Result<ImageInput> {
    if data.is_empty() {
        return Err(OcrError::Encode(format!("{} is empty", name)));
    }

    let mime_type = detect_mime_type(&data, extension)
        .ok_or_else(|| OcrError::Encode(format!("{} is not a supported image", name)))?;

    Ok(ImageInput::new(name, mime_type, data))
}

fn detect_mime_type(data: &[u8], extension: Option<&str>) -> Option<&'static str> {
    image::guess_format(data)
        .ok()
        .or_else(|| extension.and_then(|ext| ImageFormat::from_extension(ext)))
        .map(|format| format.to_mime_type())
        .filter(|mime| mime.starts_with("image/"))
}
