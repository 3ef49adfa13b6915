pub mod ai_provider;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod progress;
pub mod recognizer;

pub use ai_provider::AiProvider;
pub use backend::{GeminiBackend, OcrBackend, OllamaBackend};
pub use config::Config;
pub use error::{BackendError, OcrError};
pub use recognizer::Recognizer;
