//! Omni OCR Common Library
//!
//! CLIとバックエンドで共有される型とユーティリティ

pub mod types;
pub mod style;
pub mod prompts;
pub mod error;
pub mod parser;

pub use types::{ImageInput, EncodedImage, decode_base64};
pub use style::{OcrStyle, StyleDescriptor, list_styles, descriptor};
pub use prompts::prompt_for;
pub use error::{Error, Result};
pub use parser::{normalize_response, strip_code_fence};
