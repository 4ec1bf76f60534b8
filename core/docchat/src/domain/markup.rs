//! メッセージ本文の簡易整形（Markdown 風）
//!
//! 改行 → 太字 → 斜体 → コードブロック → インラインコード の順に正規表現を順次適用する。
//! コードスパン内の `*` も強調として解釈される（既知の制限。順次置換のまま保つ）。
//! HTML エスケープはしない。

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static CODE_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.*?)`").unwrap());

/// 本文をマークアップへ変換する
pub fn format_content(text: &str) -> String {
    let content = text.replace('\n', "<br>");
    let content = BOLD.replace_all(&content, "<strong>${1}</strong>");
    let content = ITALIC.replace_all(&content, "<em>${1}</em>");
    let content = CODE_BLOCK.replace_all(&content, "<pre><code>${1}</code></pre>");
    let content = INLINE_CODE.replace_all(&content, "<code>${1}</code>");
    content.into_owned()
}
