//! モデル出力の正規化
//!
//! JSON/Markdownを指示してもモデルが ```json ... ``` で囲んで返すことがあるため、
//! 囲みを外してそのままコピーできるテキストにする

const FENCE: &str = "```";

/// 全体を囲むコードフェンスを1段外す
///
/// 次の条件をすべて満たすときだけ内側を返す:
/// 1. 前後の空白を除いたテキストが ``` で始まり ``` で終わる
/// 2. 開始フェンス行（言語タグを含む）の後に改行がある
///
/// 条件を満たさない場合は `None`（呼び出し側は元のテキストを使う）
///
/// # Examples
/// ```
/// use omni_ocr_common::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), Some("{\"a\":1}"));
/// assert_eq!(strip_code_fence("```"), None);
/// ```
pub fn strip_code_fence(text: &str) -> Option<&str> {
    let text = text.trim();
    if !(text.starts_with(FENCE) && text.ends_with(FENCE)) {
        return None;
    }

    // 開始フェンス行の改行がなければ不正なフェンスとして扱わない
    let first_line_break = text.find('\n')?;
    let body_start = first_line_break + 1;
    let body_end = text.len() - FENCE.len();

    // 末尾3バイトは ``` なので body_start <= body_end、かつ文字境界
    if body_start > body_end {
        return None;
    }

    Some(text[body_start..body_end].trim())
}

/// モデル出力を表示用に正規化
///
/// 前後の空白を除き、全体を囲むコードフェンスがあれば外す。
/// 入れ子の囲みも外すので、正規化済みのテキストに再適用しても変化しない
pub fn normalize_response(text: &str) -> String {
    let mut clean = text.trim();
    while let Some(inner) = strip_code_fence(clean) {
        clean = inner;
    }
    clean.to_string()
}
