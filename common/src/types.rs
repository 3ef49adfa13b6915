//! 入力画像の型定義
//!
//! - ImageInput: 呼び出し側が用意する画像（バイト列 + MIMEタイプ + 表示名）
//! - EncodedImage: バックエンドへ送るBase64ペイロード

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// 認識対象の画像
///
/// 所有権は呼び出し側にあり、エンコード時に1回読まれるだけ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageInput {
    /// 表示名（ファイル名など）
    pub name: String,
    /// 宣言されたMIMEタイプ（例: "image/png"）
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Base64エンコード済み画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    /// 標準Base64（Data URLの接頭辞なし）
    pub data: String,
}

impl ImageInput {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// バイト数
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 表示用ラベル（例: "scan.png (10.0 KB)"）
    pub fn display_label(&self) -> String {
        format!("{} ({:.1} KB)", self.name, self.size() as f64 / 1024.0)
    }

    /// バックエンド送信用にBase64エンコード
    ///
    /// 空データと画像以外のMIMEタイプはエンコードエラー
    pub fn encode(&self) -> Result<EncodedImage> {
        if self.data.is_empty() {
            return Err(Error::Encode(format!("{} is empty", self.name)));
        }
        if !self.mime_type.starts_with("image/") {
            return Err(Error::Encode(format!(
                "{} is not an image (type: {})",
                self.name,
                if self.mime_type.is_empty() { "unknown" } else { self.mime_type.as_str() }
            )));
        }

        Ok(EncodedImage {
            mime_type: self.mime_type.clone(),
            data: STANDARD.encode(&self.data),
        })
    }
}

/// Base64文字列をデコード
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(data)
        .map_err(|e| Error::Encode(format!("invalid base64: {}", e)))
}
