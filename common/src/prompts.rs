//! プロンプト定義モジュール
//!
//! 認識スタイルごとにモデルへそのまま送る指示文:
//! - STYLE_PROMPTS: スタイルと指示文の対応表
//! - prompt_for: スタイルから指示文を引く

use crate::error::{Error, Result};
use crate::style::OcrStyle;

/// スタイル別の指示文
pub const STYLE_PROMPTS: &[(OcrStyle, &str)] = &[
    (
        OcrStyle::Text,
        "Extract all legible text from this image exactly as it appears. Do not add any conversational filler or markdown formatting unless it is part of the original text. Return only the raw string.",
    ),
    (
        OcrStyle::Markdown,
        "Analyze this image and transcribe the content into a well-structured Markdown document. Identify headers, lists, bold text, and code blocks. Return only the markdown content.",
    ),
    (
        OcrStyle::Latex,
        "Identify all mathematical expressions and formulas in this image. Transcribe them into valid LaTeX format. If there is surrounding text, include it as plain text mixed with the LaTeX. Return only the content.",
    ),
    (
        OcrStyle::Table,
        "Detect any tables in this image. Transcribe them specifically using Markdown table syntax. If there is text outside the table, transcribe it as plain text. Return only the markdown.",
    ),
    (
        OcrStyle::Json,
        "Analyze the structured data in this image (such as receipts, forms, or key-value pairs). extract the information and format it as a valid, flat or nested JSON object. Use lowerCamelCase for keys. Return only the JSON string, no code blocks.",
    ),
    (
        OcrStyle::Description,
        "Provide a detailed and comprehensive textual description of this image. Describe the layout, colors, objects, text content visually, and any artistic style or context.",
    ),
];

/// スタイルに対応する指示文を取得
///
/// # Arguments
/// * `style` - 認識スタイル
///
/// # Returns
/// * `Ok(&str)` - モデルに送る指示文
/// * `Err` - 対応表に欠落または空の指示文がある場合（正しいビルドでは発生しない）
pub fn prompt_for(style: OcrStyle) -> Result<&'static str> {
    STYLE_PROMPTS
        .iter()
        .find(|(s, _)| *s == style)
        .map(|(_, prompt)| *prompt)
        .filter(|prompt| !prompt.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("no prompt defined for style '{}'", style)))
}
