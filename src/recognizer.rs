//! OCR処理
//!
//! 1. 画像をBase64エンコード
//! 2. スタイルの指示文を取得
//! 3. バックエンドへ1回だけ送信（リトライなし）
//! 4. 出力を正規化（前後空白・コードフェンス除去）

use crate::backend::OcrBackend;
use crate::error::{OcrError, Result};
use omni_ocr_common::{normalize_response, prompt_for, ImageInput, OcrStyle};
use std::sync::Arc;
use tracing::{debug, error, info};

/// 画像とスタイルから認識結果を得る
///
/// 内部状態を持たないので、複数の画像を同時に処理してもよい
#[derive(Clone)]
pub struct Recognizer {
    backend: Arc<dyn OcrBackend>,
}

impl Recognizer {
    pub fn new(backend: Arc<dyn OcrBackend>) -> Self {
        Self { backend }
    }

    pub async fn recognize(&self, image: &ImageInput, style: OcrStyle) -> Result<String> {
        let result = self.run(image, style).await;
        if let Err(e) = &result {
            error!("{} ({}): {}", image.name, self.backend.name(), e);
        }
        result
    }

    async fn run(&self, image: &ImageInput, style: OcrStyle) -> Result<String> {
        let encoded = image.encode()?;
        let prompt = prompt_for(style)?;

        info!(
            "recognize {} as {} via {} ({})",
            image.display_label(),
            style,
            self.backend.name(),
            self.backend.model()
        );

        let raw = self.backend.generate(prompt, &encoded).await?;
        debug!("raw response: {} chars", raw.chars().count());

        let text = normalize_response(&raw);
        if text.is_empty() {
            return Err(OcrError::EmptyResponse);
        }
        Ok(text)
    }
}
