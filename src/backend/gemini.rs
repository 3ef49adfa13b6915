//! Gemini API連携
//!
//! 画像パート + テキストパートを1回のgenerateContentで送信する

use super::OcrBackend;
use crate::error::BackendError;
use async_trait::async_trait;
use omni_ocr_common::EncodedImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    InlineData { inline_data: InlineData<'a> },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_level: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_budget: Option<u32>,
}

/// 思考モードを最小にする設定
///
/// 世代でフィールドが違う: Gemini 3 は thinkingLevel、2.5 Flash は thinkingBudget。
/// 2.5 Pro など無効化できないモデルや未知のモデルには何も送らない
fn thinking_config(model: &str) -> Option<ThinkingConfig> {
    let model = model.trim_start_matches("models/");
    if model.starts_with("gemini-3") {
        // Pro は minimal を受け付けない
        let level = if model.contains("flash") { "minimal" } else { "low" };
        Some(ThinkingConfig {
            thinking_level: Some(level),
            thinking_budget: None,
        })
    } else if model.starts_with("gemini-2.5-flash") {
        Some(ThinkingConfig {
            thinking_level: None,
            thinking_budget: Some(0),
        })
    } else {
        None
    }
}

/// Gemini APIレスポンス
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiResponse {
    /// 先頭候補のテキストパートを連結
    fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiBackend {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        model: &str,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        }
    }

    fn api_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request<'a>(&self, prompt: &'a str, image: &'a EncodedImage) -> GeminiRequest<'a> {
        GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: &image.mime_type,
                            data: &image.data,
                        },
                    },
                    Part::Text { text: prompt },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                thinking_config: thinking_config(&self.model),
            },
        }
    }
}

fn parse_response_body(body: &str) -> Result<String, BackendError> {
    let parsed: GeminiResponse = serde_json::from_str(body).map_err(|e| {
        debug!("Gemini response is not valid JSON: {}", e);
        BackendError::EmptyResponse
    })?;

    parsed.text().ok_or(BackendError::EmptyResponse)
}

#[async_trait]
impl OcrBackend for GeminiBackend {
    async fn generate(&self, prompt: &str, image: &EncodedImage) -> Result<String, BackendError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                BackendError::Configuration(
                    "Gemini API key is not set. Export GEMINI_API_KEY (or API_KEY) and retry.".into(),
                )
            })?;

        let request = self.build_request(prompt, image);
        let url = self.api_url();
        // URLにキーを含めないままログに出す
        debug!(
            "Gemini request: url={} mime={} image={} bytes (base64)",
            url,
            image.mime_type,
            image.data.len()
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error ({}): {}", status, error_text);
            return Err(BackendError::Unavailable(format!("Gemini API Error: {}", status)));
        }

        let body = response.text().await?;
        debug!("Gemini response: {} bytes", body.len());
        parse_response_body(&body)
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> EncodedImage {
        EncodedImage {
            mime_type: "image/jpeg".into(),
            data: "/9j/4AAQ".into(),
        }
    }

    #[test]
    fn test_api_url() {
        let backend = GeminiBackend::new(
            reqwest::Client::new(),
            "https://generativelanguage.googleapis.com/v1beta/",
            "gemini-3-flash-preview",
            None,
        );
        assert_eq!(
            backend.api_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_request_body_image_then_text() {
        let backend = GeminiBackend::new(reqwest::Client::new(), "http://x", "m", None);
        let image = image();
        let request = backend.build_request("Describe", &image);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{
                    "parts": [
                        { "inline_data": { "mime_type": "image/jpeg", "data": "/9j/4AAQ" } },
                        { "text": "Describe" }
                    ]
                }],
                "generationConfig": { "temperature": 0.0 }
            })
        );
    }

    #[test]
    fn test_thinking_config_per_model() {
        let level = |model: &str| thinking_config(model).and_then(|c| c.thinking_level);
        assert_eq!(level("gemini-3-flash-preview"), Some("minimal"));
        assert_eq!(level("models/gemini-3-flash-preview"), Some("minimal"));
        assert_eq!(level("gemini-3-pro-preview"), Some("low"));

        let flash_25 = thinking_config("gemini-2.5-flash").unwrap();
        assert_eq!(flash_25.thinking_budget, Some(0));
        assert!(flash_25.thinking_level.is_none());

        assert!(thinking_config("gemini-2.5-pro").is_none());
        assert!(thinking_config("gemini-2.0-flash").is_none());
    }

    #[test]
    fn test_request_body_disables_thinking() {
        let backend =
            GeminiBackend::new(reqwest::Client::new(), "http://x", "gemini-3-flash-preview", None);
        let image = image();
        let json = serde_json::to_value(backend.build_request("Extract", &image)).unwrap();
        assert_eq!(
            json["generationConfig"],
            serde_json::json!({
                "temperature": 0.0,
                "thinkingConfig": { "thinkingLevel": "minimal" }
            })
        );

        let backend = GeminiBackend::new(reqwest::Client::new(), "http://x", "gemini-2.5-flash", None);
        let json = serde_json::to_value(backend.build_request("Extract", &image)).unwrap();
        assert_eq!(json["generationConfig"]["thinkingConfig"]["thinkingBudget"], 0);
    }

    #[test]
    fn test_parse_joins_text_parts() {
        let body = r#"{
            "candidates": [{
                "content": { "parts": [ { "text": "Hello " }, { "text": "World" } ], "role": "model" },
                "finishReason": "STOP"
            }]
        }"#;
        assert_eq!(parse_response_body(body).unwrap(), "Hello World");
    }

    #[test]
    fn test_parse_no_candidates() {
        assert!(matches!(parse_response_body("{}"), Err(BackendError::EmptyResponse)));
        assert!(matches!(
            parse_response_body(r#"{"candidates": []}"#),
            Err(BackendError::EmptyResponse)
        ));
    }

    #[test]
    fn test_parse_candidate_without_text() {
        let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        assert!(matches!(parse_response_body(body), Err(BackendError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_configuration_error() {
        let backend = GeminiBackend::new(reqwest::Client::new(), "http://127.0.0.1:9", "m", None);
        let err = backend.generate("Extract", &image()).await.unwrap_err();
        assert!(matches!(err, BackendError::Configuration(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn test_blank_api_key_is_configuration_error() {
        let backend =
            GeminiBackend::new(reqwest::Client::new(), "http://127.0.0.1:9", "m", Some("  ".into()));
        let err = backend.generate("Extract", &image()).await.unwrap_err();
        assert!(matches!(err, BackendError::Configuration(_)));
    }
}
