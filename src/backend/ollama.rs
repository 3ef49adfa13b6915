//! Ollama互換エンドポイント連携
//!
//! POST {endpoint}/api/generate（非ストリーミング、temperature 0、thinkなし）

use super::OcrBackend;
use crate::error::BackendError;
use async_trait::async_trait;
use omni_ocr_common::EncodedImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// /api/generate リクエスト
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    images: Vec<&'a str>,
    think: bool,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

/// /api/generate レスポンス（responseのみ使用）
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

pub struct OllamaBackend {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OllamaBackend {
    pub fn new(client: reqwest::Client, endpoint: &str, model: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/api/generate", self.endpoint)
    }

    fn build_request<'a>(&'a self, prompt: &'a str, image: &'a EncodedImage) -> GenerateRequest<'a> {
        GenerateRequest {
            model: &self.model,
            prompt,
            images: vec![image.data.as_str()],
            think: false,
            stream: false,
            options: GenerateOptions { temperature: 0.0 },
        }
    }
}

/// レスポンス本文からテキストを取り出す
fn parse_response_body(body: &str) -> Result<String, BackendError> {
    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        debug!("Ollama response is not valid JSON: {}", e);
        BackendError::EmptyResponse
    })?;

    parsed
        .response
        .filter(|text| !text.is_empty())
        .ok_or(BackendError::EmptyResponse)
}

#[async_trait]
impl OcrBackend for OllamaBackend {
    async fn generate(&self, prompt: &str, image: &EncodedImage) -> Result<String, BackendError> {
        let request = self.build_request(prompt, image);
        let url = self.api_url();
        debug!(
            "Ollama request: url={} model={} image={} bytes (base64)",
            url,
            self.model,
            image.data.len()
        );

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Ollama API error ({}): {}", status, error_text);
            return Err(BackendError::Unavailable(format!("Ollama API Error: {}", status)));
        }

        let body = response.text().await?;
        debug!("Ollama response: {} bytes", body.len());
        parse_response_body(&body)
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> OllamaBackend {
        OllamaBackend::new(reqwest::Client::new(), "http://localhost:11434/", "qwen3-vl:8b")
    }

    fn image() -> EncodedImage {
        EncodedImage {
            mime_type: "image/png".into(),
            data: "iVBORw0KGgo=".into(),
        }
    }

    #[test]
    fn test_api_url() {
        assert_eq!(backend().api_url(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn test_request_body() {
        let backend = backend();
        let image = image();
        let request = backend.build_request("Extract text", &image);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "model": "qwen3-vl:8b",
                "prompt": "Extract text",
                "images": ["iVBORw0KGgo="],
                "think": false,
                "stream": false,
                "options": { "temperature": 0.0 }
            })
        );
    }

    #[test]
    fn test_parse_response_body() {
        let body = r#"{"model":"qwen3-vl:8b","response":"Hello World","done":true}"#;
        assert_eq!(parse_response_body(body).unwrap(), "Hello World");
    }

    #[test]
    fn test_parse_response_missing_field() {
        let body = r#"{"model":"qwen3-vl:8b","done":true}"#;
        assert!(matches!(parse_response_body(body), Err(BackendError::EmptyResponse)));
    }

    #[test]
    fn test_parse_response_empty_text() {
        let body = r#"{"response":""}"#;
        assert!(matches!(parse_response_body(body), Err(BackendError::EmptyResponse)));
    }

    #[test]
    fn test_parse_response_not_json() {
        assert!(matches!(parse_response_body("<html>"), Err(BackendError::EmptyResponse)));
    }
}
