//! トランスクリプトを HTML ファイルへ書き出す Renderer
//!
//! 変更のたびにファイル全体を書き直す（リセットとテーマ変更を反映できるように）。
//! 入力中・ローディング・アラートはファイルに残さない。

use crate::domain::{format_content, ChatMessage, Role, Theme};
use crate::ports::outbound::Renderer;
use anyhow::{Context, Result};
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::terminal_renderer::WELCOME;

#[derive(Default)]
struct Page {
    rows: Vec<String>,
    documents: Vec<String>,
    suggestions: Vec<String>,
    dark: bool,
}

fn message_row(role: Role, content_markup: &str, info: &str) -> String {
    let (class, icon) = match role {
        Role::User => ("user", "user"),
        Role::Bot => ("bot", "robot"),
    };
    format!(
        r#"<div class="message-row {class}-message">
  <div class="avatar"><i class="fas fa-{icon}"></i></div>
  <div class="message-content">
    <div class="message-bubble"><p>{content_markup}</p></div>
    <div class="message-info"><span class="message-time">{info}</span></div>
  </div>
</div>
"#
    )
}

fn render_page(page: &Page) -> String {
    let body_class = if page.dark { " class=\"dark-mode\"" } else { "" };
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>docchat transcript</title></head>\n");
    html.push_str(&format!("<body{}>\n", body_class));
    html.push_str("<div id=\"document-list\">\n");
    for doc in &page.documents {
        html.push_str(&format!(
            "<div class=\"document-item\"><div class=\"document-name\" title=\"{0}\">{0}</div></div>\n",
            doc
        ));
    }
    html.push_str("</div>\n<div id=\"chat-messages\">\n");
    html.push_str(&message_row(Role::Bot, WELCOME, ""));
    for row in &page.rows {
        html.push_str(row);
    }
    html.push_str("</div>\n<div id=\"question-list\">\n");
    for q in &page.suggestions {
        html.push_str(&format!("<div class=\"question-item suggested-question\">{}</div>\n", q));
    }
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

pub struct HtmlTranscriptRenderer {
    path: PathBuf,
    page: Mutex<Page>,
    log: Arc<dyn Log>,
}

impl HtmlTranscriptRenderer {
    pub fn new(path: impl Into<PathBuf>, log: Arc<dyn Log>) -> Self {
        Self {
            path: path.into(),
            page: Mutex::new(Page::default()),
            log,
        }
    }

    fn write_page(&self, page: &Page) -> Result<()> {
        std::fs::write(&self.path, render_page(page))
            .with_context(|| format!("write transcript {:?}", self.path))
    }

    /// ページを更新して書き直す。書き込み失敗はログに残し、セッションは止めない。
    fn update(&self, f: impl FnOnce(&mut Page)) {
        if let Ok(mut page) = self.page.lock() {
            f(&mut *page);
            if let Err(e) = self.write_page(&page) {
                let _ = self.log.log(
                    &LogRecord::new(
                        LogLevel::Warn,
                        "adapter",
                        "transcript",
                        "failed to write transcript",
                    )
                    .field("error", format!("{:#}", e)),
                );
            }
        }
    }
}

impl Renderer for HtmlTranscriptRenderer {
    fn mount(&self) -> std::result::Result<(), Error> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        if !parent.is_dir() {
            return Err(Error::invalid_argument(format!(
                "transcript directory does not exist: {}",
                parent.display()
            )));
        }
        let page = self
            .page
            .lock()
            .map_err(|_| Error::system("transcript state poisoned"))?;
        self.write_page(&page)
            .map_err(|e| Error::io_msg(format!("{:#}", e)))
    }

    fn render_message(&self, message: &ChatMessage) {
        let mut info = message.display_time();
        if let Some(secs) = message.processing_time() {
            info.push_str(&format!(" · {:.2}s", secs));
        }
        let row = message_row(message.role(), &format_content(message.content()), &info);
        self.update(|page| page.rows.push(row));
    }

    fn show_typing(&self) {}

    fn hide_typing(&self) {}

    fn render_suggestions(&self, list: &[String]) {
        let list = list.to_vec();
        self.update(|page| page.suggestions = list);
    }

    fn render_quick_replies(&self, _list: &[String]) {}

    fn show_loading(&self, _label: &str) {}

    fn hide_loading(&self) {}

    fn alert(&self, _text: &str) {}

    fn reset_transcript(&self) {
        self.update(|page| page.rows.clear());
    }

    fn add_document(&self, filename: &str) {
        let filename = filename.to_string();
        self.update(|page| page.documents.push(filename));
    }

    fn apply_theme(&self, theme: Theme) {
        self.update(|page| page.dark = theme == Theme::Dark);
    }
}
