//! 入力コントローラ（チャットセッションの制御）
//!
//! 入力イベントを「送信」か「クリア」に正規化し、セッション状態・描画・通信を順に呼ぶ。
//! 送信の流れ: ユーザー発言を追加 → 描画 → 入力中表示 → 通信 → 入力中表示を消す → 応答を追加・描画。
//! リクエスト中は `&mut self` を借りたままなので、同じコントローラから二重送信はできない。

use crate::domain::{Composer, InputEvent, QuickReplies, Role};
use crate::ports::outbound::{ChatTransport, ConfirmPrompt, Renderer, TransportError};
use crate::usecase::guards::{LoadingGuard, TypingGuard};
use crate::usecase::session::SessionState;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

pub const CLEAR_CONFIRMATION: &str = "Are you sure you want to clear your chat history?";
pub const CLEARED_NOTICE: &str = "Chat history has been cleared. You can start a new conversation.";
pub const APOLOGY: &str =
    "Sorry, I encountered an error processing your request. Please try again later.";

/// イベント処理の結果（テストと終了コードの判定に使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// 入力欄を編集しただけ
    Editing,
    /// 空入力・存在しない項目など。何も起きていない。
    Ignored,
    Replied,
    /// 通信に失敗し、代替メッセージを表示した
    ReplyFailed,
    Cleared,
    ClearDeclined,
    ClearFailed,
}

/// 通信エラーを表示用の文言にする
///
/// 代替メッセージ > 2xx の error ボディ（"Error: x"）> 汎用のお詫び の順。
pub fn reply_text_for_error(err: &TransportError) -> String {
    if let Some(fallback) = err.fallback() {
        return fallback.to_string();
    }
    match err {
        TransportError::Server { error, .. } => format!("Error: {}", error),
        _ => APOLOGY.to_string(),
    }
}

fn cleared_notice(cache_size: Option<u64>) -> String {
    match cache_size {
        Some(n) => format!(
            "Chat history has been cleared ({} cached responses removed). You can start a new conversation.",
            n
        ),
        None => CLEARED_NOTICE.to_string(),
    }
}

pub struct ChatController {
    session: SessionState,
    composer: Composer,
    quick_replies: QuickReplies,
    suggestion_count: usize,
    displayed_suggestions: Vec<String>,
    renderer: Arc<dyn Renderer>,
    transport: Arc<dyn ChatTransport>,
    confirm: Arc<dyn ConfirmPrompt>,
    log: Arc<dyn Log>,
}

impl ChatController {
    pub fn new(
        session: SessionState,
        quick_replies: QuickReplies,
        suggestion_count: usize,
        renderer: Arc<dyn Renderer>,
        transport: Arc<dyn ChatTransport>,
        confirm: Arc<dyn ConfirmPrompt>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            session,
            composer: Composer::new(),
            quick_replies,
            suggestion_count,
            displayed_suggestions: Vec::new(),
            renderer,
            transport,
            confirm,
            log,
        }
    }

    /// 描画先を初期化し、候補とクイックリプライを出す
    pub fn start(&mut self) -> Result<(), common::error::Error> {
        self.renderer.mount()?;
        self.refresh_suggestions();
        self.renderer.render_quick_replies(self.quick_replies.items());
        Ok(())
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn displayed_suggestions(&self) -> &[String] {
        &self.displayed_suggestions
    }

    pub fn quick_replies(&self) -> &[String] {
        self.quick_replies.items()
    }

    pub fn composer_text(&self) -> &str {
        self.composer.text()
    }

    pub async fn handle(&mut self, event: InputEvent) -> Handled {
        match event {
            InputEvent::Key(key) => match self.composer.press(key) {
                Some(text) => self.send_message(&text).await,
                None => Handled::Editing,
            },
            InputEvent::SuggestionClicked(text) => self.submit_text(text).await,
            InputEvent::QuickReplyClicked(index) => match self.quick_replies.take(index) {
                Some(text) => {
                    self.renderer.render_quick_replies(self.quick_replies.items());
                    self.submit_text(text).await
                }
                None => Handled::Ignored,
            },
            InputEvent::ClearRequested => self.request_clear().await,
        }
    }

    /// 入力欄を text で置き換えて送信する（クリック操作）
    async fn submit_text(&mut self, text: String) -> Handled {
        self.composer.set_text(text);
        let text = self.composer.press(crate::domain::Key::Enter { shift: false });
        match text {
            Some(text) => self.send_message(&text).await,
            None => Handled::Ignored,
        }
    }

    /// 1 メッセージを送る。空白のみなら何もしない。
    pub async fn send_message(&mut self, raw: &str) -> Handled {
        let message = raw.trim();
        if message.is_empty() {
            return Handled::Ignored;
        }
        let message = message.to_string();

        self.session.mark_asked(&message);
        let user = self.session.append_message(Role::User, message.as_str());
        self.renderer.render_message(&user);
        self.refresh_suggestions();

        let reply = {
            let _typing = TypingGuard::show(self.renderer.as_ref());
            self.transport.send_chat_message(&message).await
        };

        match reply {
            Ok(answer) => {
                let bot = self
                    .session
                    .append_reply(answer.response, answer.processing_time);
                self.renderer.render_message(&bot);
                Handled::Replied
            }
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "usecase", "chat", "chat request failed")
                        .field("error", e.to_string()),
                );
                let bot = self
                    .session
                    .append_message(Role::Bot, reply_text_for_error(&e));
                self.renderer.render_message(&bot);
                Handled::ReplyFailed
            }
        }
    }

    /// 確認のうえサーバ側の履歴を消し、表示とセッション状態を初期化する
    pub async fn request_clear(&mut self) -> Handled {
        let confirmed = match self.confirm.confirm(CLEAR_CONFIRMATION) {
            Ok(answer) => answer,
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "usecase", "clear", "confirmation failed")
                        .field("error", e.to_string()),
                );
                self.renderer
                    .alert(&format!("Failed to clear data: {}", e));
                return Handled::ClearFailed;
            }
        };
        if !confirmed {
            return Handled::ClearDeclined;
        }

        let result = {
            let _loading = LoadingGuard::show(self.renderer.as_ref(), "Clearing chat history...");
            self.transport.clear_session().await
        };

        match result {
            Ok(receipt) => {
                self.renderer.reset_transcript();
                self.session.clear();
                self.refresh_suggestions();
                let notice = self
                    .session
                    .append_message(Role::Bot, cleared_notice(receipt.cache_size));
                self.renderer.render_message(&notice);
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "usecase", "clear", "session cleared")
                        .field("cache_size", receipt.cache_size),
                );
                Handled::Cleared
            }
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "usecase", "clear", "clear request failed")
                        .field("error", e.to_string()),
                );
                self.renderer
                    .alert(&format!("Failed to clear data: {}", e));
                Handled::ClearFailed
            }
        }
    }

    /// 候補を選び直して描画する
    pub fn refresh_suggestions(&mut self) {
        self.displayed_suggestions = self.session.select_suggestions(self.suggestion_count);
        self.renderer.render_suggestions(&self.displayed_suggestions);
    }
}
