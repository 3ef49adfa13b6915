use crate::ai_provider::AiProvider;
use crate::error::{OcrError, Result};
use serde::Serialize;
use std::time::Duration;

/// APIキーを読む環境変数（先頭を優先）
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub backend: AiProvider,
    /// Noneならバックエンドの既定エンドポイント
    pub endpoint: Option<String>,
    /// Noneならバックエンドの既定モデル
    pub model: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: AiProvider::default(),
            endpoint: None,
            model: None,
            api_key: None,
            timeout_seconds: 120,
        }
    }
}

impl Config {
    /// 既定値 + 環境変数のAPIキー
    ///
    /// キーがなくてもここでは失敗しない（Geminiの初回呼び出しで設定エラー）
    pub fn load() -> Self {
        let api_key = API_KEY_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|key| !key.trim().is_empty()));

        Self {
            api_key,
            ..Self::default()
        }
    }

    pub fn with_backend(mut self, backend: AiProvider) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if endpoint.is_some() {
            self.endpoint = endpoint;
        }
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if model.is_some() {
            self.model = model;
        }
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        if let Some(secs) = timeout_seconds {
            self.timeout_seconds = secs;
        }
        self
    }

    pub fn model_name(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }

    pub fn endpoint_url(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.backend.default_endpoint())
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Result<Duration> {
        if self.timeout_seconds == 0 {
            return Err(OcrError::Configuration(
                "timeout must be at least 1 second".into(),
            ));
        }
        Ok(Duration::from_secs(self.timeout_seconds))
    }

    /// 表示用にマスクしたAPIキー
    pub fn masked_api_key(&self) -> String {
        match &self.api_key {
            Some(key) if key.chars().count() > 8 => {
                let chars: Vec<char> = key.chars().collect();
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("****{}", tail)
            }
            Some(_) => "****".into(),
            None => "(not set)".into(),
        }
    }
}
