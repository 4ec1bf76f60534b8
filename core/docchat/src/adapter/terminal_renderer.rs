//! 端末への描画（ANSI エスケープ）
//!
//! format_content のマークアップを端末の装飾に変換して出力する。
//! 書き込むたびに flush する（端末ではこれが「最下部へのスクロール」に当たる）。

use crate::domain::{format_content, ChatMessage, Role, Theme};
use crate::ports::outbound::Renderer;
use common::error::Error;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub const WELCOME: &str =
    "Hello! I'm your document assistant. Upload a PDF with /upload, then ask me anything about it.";

/// 候補を出し尽くしたときに古い一覧の代わりに出す行
const NO_SUGGESTIONS: &str = "No suggested questions right now.";
const RESET: &str = "\x1b[0m";
const BOLD_ON: &str = "\x1b[1m";
const BOLD_OFF: &str = "\x1b[22m";
const ITALIC_ON: &str = "\x1b[3m";
const ITALIC_OFF: &str = "\x1b[23m";
const CLEAR_LINE: &str = "\r\x1b[2K";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

static STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<strong>(.*?)</strong>").unwrap());
static EM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<em>(.*?)</em>").unwrap());
static PRE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<pre><code>(.*?)</code></pre>").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<code>(.*?)</code>").unwrap());

/// 対話用か、1 回きりの問い合わせ用か
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalMode {
    /// ウェルカム・候補・クイックリプライも表示する
    Interactive,
    /// 応答とエラーだけを表示する
    OneShot,
}

struct Palette {
    user: &'static str,
    bot: &'static str,
    code: &'static str,
    dim: &'static str,
    alert: &'static str,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            user: "\x1b[96m",
            bot: "\x1b[92m",
            code: "\x1b[93m",
            dim: "\x1b[90m",
            alert: "\x1b[91m",
        },
        Theme::Light => Palette {
            user: "\x1b[34m",
            bot: "\x1b[32m",
            code: "\x1b[35m",
            dim: "\x1b[2m",
            alert: "\x1b[31m",
        },
    }
}

/// format_content のマークアップを ANSI 装飾に置き換える
pub fn markup_to_ansi(markup: &str, theme: Theme) -> String {
    let p = palette(theme);
    let text = markup.replace("<br>", "\n");
    let text = PRE.replace_all(&text, |caps: &regex::Captures| {
        format!("\n{}{}{}\n", p.code, caps[1].trim_matches('\n'), RESET)
    });
    let text = CODE.replace_all(&text, |caps: &regex::Captures| {
        format!("{}{}{}", p.code, &caps[1], RESET)
    });
    let text = STRONG.replace_all(&text, format!("{}${{1}}{}", BOLD_ON, BOLD_OFF).as_str());
    let text = EM.replace_all(&text, format!("{}${{1}}{}", ITALIC_ON, ITALIC_OFF).as_str());
    text.into_owned()
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|l| format!("  {}", l))
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct TerminalRenderer {
    out: Mutex<Box<dyn Write + Send>>,
    mode: TerminalMode,
    theme: Mutex<Theme>,
    typing: AtomicBool,
    loading: AtomicBool,
}

impl TerminalRenderer {
    pub fn new(out: Box<dyn Write + Send>, mode: TerminalMode) -> Self {
        Self {
            out: Mutex::new(out),
            mode,
            theme: Mutex::new(Theme::Light),
            typing: AtomicBool::new(false),
            loading: AtomicBool::new(false),
        }
    }

    pub fn stdout(mode: TerminalMode) -> Self {
        Self::new(Box::new(std::io::stdout()), mode)
    }

    fn theme(&self) -> Theme {
        self.theme.lock().map(|t| *t).unwrap_or(Theme::Light)
    }

    fn write(&self, text: &str) -> std::io::Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "output lock poisoned"))?;
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    /// 描画の失敗ではセッションを止めない
    fn emit(&self, text: &str) {
        let _ = self.write(text);
    }

    fn interactive(&self) -> bool {
        self.mode == TerminalMode::Interactive
    }

    fn welcome(&self) -> String {
        let p = palette(self.theme());
        format!("{}{}Assistant{}\n{}\n\n", BOLD_ON, p.bot, RESET, indent(WELCOME))
    }
}

impl Renderer for TerminalRenderer {
    fn mount(&self) -> Result<(), Error> {
        let banner = if self.interactive() {
            self.welcome()
        } else {
            String::new()
        };
        self.write(&banner)
            .map_err(|e| Error::io_msg(format!("terminal is not writable: {}", e)))
    }

    fn render_message(&self, message: &ChatMessage) {
        let p = palette(self.theme());
        let (label, color) = match message.role() {
            Role::User => ("You", p.user),
            Role::Bot => ("Assistant", p.bot),
        };
        let mut info = message.display_time();
        if let Some(secs) = message.processing_time() {
            info.push_str(&format!(" · {:.2}s", secs));
        }
        let body = markup_to_ansi(&format_content(message.content()), self.theme());
        self.emit(&format!(
            "{}{}{}{} {}{}{}\n{}\n\n",
            BOLD_ON, color, label, RESET, p.dim, info, RESET,
            indent(&body)
        ));
    }

    fn show_typing(&self) {
        if !self.typing.swap(true, Ordering::SeqCst) {
            let p = palette(self.theme());
            self.emit(&format!("{}  Assistant is typing...{}", p.dim, RESET));
        }
    }

    fn hide_typing(&self) {
        if self.typing.swap(false, Ordering::SeqCst) {
            self.emit(CLEAR_LINE);
        }
    }

    fn render_suggestions(&self, list: &[String]) {
        if !self.interactive() {
            return;
        }
        let p = palette(self.theme());
        if list.is_empty() {
            self.emit(&format!("{}{}{}\n\n", p.dim, NO_SUGGESTIONS, RESET));
            return;
        }
        let mut text = format!("{}Suggested questions (/ask N):{}\n", p.dim, RESET);
        for (i, q) in list.iter().enumerate() {
            text.push_str(&format!("  [{}] {}\n", i + 1, q));
        }
        text.push('\n');
        self.emit(&text);
    }

    fn render_quick_replies(&self, list: &[String]) {
        if !self.interactive() || list.is_empty() {
            return;
        }
        let p = palette(self.theme());
        let items = list
            .iter()
            .enumerate()
            .map(|(i, q)| format!("[{}] {}", i + 1, q))
            .collect::<Vec<_>>()
            .join("  ");
        self.emit(&format!("{}Quick replies (/reply N):{} {}\n\n", p.dim, RESET, items));
    }

    fn show_loading(&self, label: &str) {
        if !self.loading.swap(true, Ordering::SeqCst) {
            let p = palette(self.theme());
            self.emit(&format!("{}{}{}", p.dim, label, RESET));
        }
    }

    fn hide_loading(&self) {
        if self.loading.swap(false, Ordering::SeqCst) {
            self.emit(CLEAR_LINE);
        }
    }

    fn alert(&self, text: &str) {
        let p = palette(self.theme());
        self.emit(&format!("{}{}!{} {}\n", BOLD_ON, p.alert, RESET, text));
    }

    fn reset_transcript(&self) {
        if self.interactive() {
            self.emit(&format!("{}{}", CLEAR_SCREEN, self.welcome()));
        }
    }

    fn add_document(&self, filename: &str) {
        let p = palette(self.theme());
        self.emit(&format!("{}[document]{} {}\n", p.dim, RESET, filename));
    }

    fn apply_theme(&self, theme: Theme) {
        if let Ok(mut current) = self.theme.lock() {
            *current = theme;
        }
    }
}
