//! 処理中スピナー

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// スピナーを表示するか
///
/// stderrが端末でなければ出さない（パイプやログ収集を汚さない）
pub fn is_interactive() -> bool {
    std::io::stderr().is_terminal()
}

/// リクエスト中のスピナーを作る
///
/// `visible` が false なら何も描画しない ProgressBar を返す
pub fn spinner(message: String, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
