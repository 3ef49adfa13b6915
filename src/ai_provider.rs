use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 推論バックエンドの種類
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    /// ローカルのOllama互換エンドポイント
    #[default]
    Ollama,
    /// Gemini API
    Gemini,
}

impl AiProvider {
    pub fn name(&self) -> &'static str {
        match self {
            AiProvider::Ollama => "ollama",
            AiProvider::Gemini => "gemini",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            AiProvider::Ollama => "qwen3-vl:8b",
            AiProvider::Gemini => "gemini-3-flash-preview",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            AiProvider::Ollama => "http://localhost:11434",
            AiProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
