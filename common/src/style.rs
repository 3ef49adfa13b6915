//! 認識スタイルのカタログ
//!
//! - OcrStyle: 6種類の固定された認識スタイル
//! - StyleDescriptor: 選択UI向けのラベル・説明・アイコン
//! - list_styles: 表示順のカタログ

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 認識スタイル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrStyle {
    /// プレーンテキスト
    #[default]
    Text,
    Markdown,
    /// 数式（LaTeX）
    Latex,
    /// Markdownテーブル
    Table,
    Json,
    /// 画像の説明文
    Description,
}

impl OcrStyle {
    /// 全スタイル（カタログ順）
    pub const ALL: [OcrStyle; 6] = [
        OcrStyle::Text,
        OcrStyle::Markdown,
        OcrStyle::Latex,
        OcrStyle::Table,
        OcrStyle::Json,
        OcrStyle::Description,
    ];

    /// 安定したID文字列
    pub fn id(&self) -> &'static str {
        match self {
            OcrStyle::Text => "text",
            OcrStyle::Markdown => "markdown",
            OcrStyle::Latex => "latex",
            OcrStyle::Table => "table",
            OcrStyle::Json => "json",
            OcrStyle::Description => "description",
        }
    }
}

impl fmt::Display for OcrStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for OcrStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "plain" => Ok(OcrStyle::Text),
            "markdown" | "md" => Ok(OcrStyle::Markdown),
            "latex" | "math" => Ok(OcrStyle::Latex),
            "table" => Ok(OcrStyle::Table),
            "json" => Ok(OcrStyle::Json),
            "description" | "desc" => Ok(OcrStyle::Description),
            _ => Err(format!(
                "Unknown style: {}. Use text, markdown, latex, table, json, or description",
                s
            )),
        }
    }
}

/// スタイル選択UI向けの表示情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    pub style: OcrStyle,
    pub label: &'static str,
    pub description: &'static str,
    pub icon_name: &'static str,
}

/// スタイルカタログ（表示順）
static OCR_OPTIONS: [StyleDescriptor; 6] = [
    StyleDescriptor {
        style: OcrStyle::Text,
        label: "Plain Text",
        description: "Extract raw text directly.",
        icon_name: "Type",
    },
    StyleDescriptor {
        style: OcrStyle::Markdown,
        label: "Markdown",
        description: "Preserve formatting (headers, lists).",
        icon_name: "FileText",
    },
    StyleDescriptor {
        style: OcrStyle::Latex,
        label: "Math / LaTeX",
        description: "Convert formulas to LaTeX.",
        icon_name: "Sigma",
    },
    StyleDescriptor {
        style: OcrStyle::Table,
        label: "Table",
        description: "Convert grids to Markdown tables.",
        icon_name: "Table",
    },
    StyleDescriptor {
        style: OcrStyle::Json,
        label: "JSON",
        description: "Structure data as JSON.",
        icon_name: "Braces",
    },
    StyleDescriptor {
        style: OcrStyle::Description,
        label: "Description",
        description: "Detailed visual explanation.",
        icon_name: "Eye",
    },
];

/// カタログ一覧を返す
///
/// 呼び出しごとに新しいVecを返すため、何度でも列挙できる
pub fn list_styles() -> Vec<StyleDescriptor> {
    OCR_OPTIONS.to_vec()
}

/// スタイルに対応する表示情報
pub fn descriptor(style: OcrStyle) -> Option<&'static StyleDescriptor> {
    OCR_OPTIONS.iter().find(|d| d.style == style)
}

/// カタログをJSON文字列で出力
pub fn catalog_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&OCR_OPTIONS)?)
}
