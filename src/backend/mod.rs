//! 推論バックエンド
//!
//! 「指示文 + 画像 → テキスト」だけを担う。
//! どの実装を使うかは設定で決まり、OCR処理側は通信の詳細を知らない

mod gemini;
mod ollama;

pub use gemini::GeminiBackend;
pub use ollama::OllamaBackend;

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::{BackendError, OcrError, Result};
use async_trait::async_trait;
use omni_ocr_common::EncodedImage;
use std::sync::Arc;

#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// 指示文と画像を送り、モデルの生テキストを返す
    async fn generate(
        &self,
        prompt: &str,
        image: &EncodedImage,
    ) -> std::result::Result<String, BackendError>;

    fn name(&self) -> &str;

    fn model(&self) -> &str;
}

/// 設定からHTTPクライアントを作成（タイムアウト付き）
pub fn http_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout()?)
        .build()
        .map_err(|e| OcrError::Configuration(format!("failed to build HTTP client: {}", e)))
}

/// 設定に応じたバックエンドを作成
pub fn build(config: &Config) -> Result<Arc<dyn OcrBackend>> {
    let client = http_client(config)?;
    let backend: Arc<dyn OcrBackend> = match config.backend {
        AiProvider::Ollama => Arc::new(OllamaBackend::new(
            client,
            config.endpoint_url(),
            config.model_name(),
        )),
        AiProvider::Gemini => Arc::new(GeminiBackend::new(
            client,
            config.endpoint_url(),
            config.model_name(),
            config.api_key.clone(),
        )),
    };
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_ollama() {
        let backend = build(&Config::default()).unwrap();
        assert_eq!(backend.name(), "ollama");
        assert_eq!(backend.model(), "qwen3-vl:8b");
    }

    #[test]
    fn test_build_gemini_without_key() {
        // キーがなくても作成は成功する
        let config = Config::default().with_backend(AiProvider::Gemini);
        let backend = build(&config).unwrap();
        assert_eq!(backend.name(), "gemini");
        assert_eq!(backend.model(), "gemini-3-flash-preview");
    }

    #[test]
    fn test_build_rejects_zero_timeout() {
        let config = Config::default().with_timeout(Some(0));
        assert!(matches!(build(&config), Err(OcrError::Configuration(_))));
    }
}
