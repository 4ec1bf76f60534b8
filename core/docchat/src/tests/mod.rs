//! モジュール横断のテスト（ポートのフェイクを共有する）

mod run_app_tests;

use crate::domain::{ChatMessage, QuickReplies, SuggestionPool, Theme, UploadFile};
use crate::ports::outbound::{
    ChatAnswer, ChatTransport, ClearReceipt, ConfirmPrompt, DocumentUploader, Renderer,
    ThemeStore, TransportError, UploadReceipt,
};
use crate::usecase::{ChatController, SessionState};
use async_trait::async_trait;
use chrono::{Local, TimeZone};
use common::adapter::{FixedClock, NoopLog};
use common::error::Error;
use common::ports::outbound::Clock;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// 描画・通信の呼び出し順を記録する共有ジャーナル
pub(crate) type Journal = Arc<Mutex<Vec<String>>>;

pub(crate) fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

/// ジャーナル中で最初に needle を含む位置
pub(crate) fn position(journal: &Journal, needle: &str) -> Option<usize> {
    entries(journal).iter().position(|e| e.contains(needle))
}

pub(crate) fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(
        Local.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
    ))
}

/// DOM 相当の状態（入力中プレースホルダの数など）を持つフェイク
pub(crate) struct FakeRenderer {
    journal: Journal,
    typing: Mutex<usize>,
    loading: Mutex<bool>,
    messages: Mutex<Vec<ChatMessage>>,
    alerts: Mutex<Vec<String>>,
    suggestions: Mutex<Vec<String>>,
    documents: Mutex<Vec<String>>,
    theme: Mutex<Option<Theme>>,
}

impl FakeRenderer {
    pub(crate) fn new(journal: Journal) -> Self {
        Self {
            journal,
            typing: Mutex::new(0),
            loading: Mutex::new(false),
            messages: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
            suggestions: Mutex::new(Vec::new()),
            documents: Mutex::new(Vec::new()),
            theme: Mutex::new(None),
        }
    }

    fn record(&self, entry: String) {
        self.journal.lock().unwrap().push(entry);
    }

    pub(crate) fn typing_placeholders(&self) -> usize {
        *self.typing.lock().unwrap()
    }

    pub(crate) fn loading_visible(&self) -> bool {
        *self.loading.lock().unwrap()
    }

    /// 画面に残っているメッセージ（reset_transcript で消える）
    pub(crate) fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub(crate) fn suggestions(&self) -> Vec<String> {
        self.suggestions.lock().unwrap().clone()
    }

    pub(crate) fn documents(&self) -> Vec<String> {
        self.documents.lock().unwrap().clone()
    }

    pub(crate) fn theme(&self) -> Option<Theme> {
        *self.theme.lock().unwrap()
    }
}

impl Renderer for FakeRenderer {
    fn mount(&self) -> Result<(), Error> {
        self.record("mount".into());
        Ok(())
    }

    fn render_message(&self, message: &ChatMessage) {
        self.record(format!("message:{}:{}", message.role().as_str(), message.content()));
        self.messages.lock().unwrap().push(message.clone());
    }

    fn show_typing(&self) {
        self.record("typing:show".into());
        *self.typing.lock().unwrap() = 1;
    }

    fn hide_typing(&self) {
        self.record("typing:hide".into());
        *self.typing.lock().unwrap() = 0;
    }

    fn render_suggestions(&self, list: &[String]) {
        self.record(format!("suggestions:{}", list.len()));
        *self.suggestions.lock().unwrap() = list.to_vec();
    }

    fn render_quick_replies(&self, list: &[String]) {
        self.record(format!("quick_replies:{}", list.len()));
    }

    fn show_loading(&self, label: &str) {
        self.record(format!("loading:show:{}", label));
        *self.loading.lock().unwrap() = true;
    }

    fn hide_loading(&self) {
        self.record("loading:hide".into());
        *self.loading.lock().unwrap() = false;
    }

    fn alert(&self, text: &str) {
        self.record(format!("alert:{}", text));
        self.alerts.lock().unwrap().push(text.to_string());
    }

    fn reset_transcript(&self) {
        self.record("reset".into());
        self.messages.lock().unwrap().clear();
    }

    fn add_document(&self, filename: &str) {
        self.record(format!("document:{}", filename));
        self.documents.lock().unwrap().push(filename.to_string());
    }

    fn apply_theme(&self, theme: Theme) {
        self.record(format!("theme:{}", theme.as_str()));
        *self.theme.lock().unwrap() = Some(theme);
    }
}

/// 台本どおりに応答するフェイク。呼ばれた時点でジャーナルに記録する。
pub(crate) struct FakeTransport {
    journal: Journal,
    chat: Mutex<VecDeque<Result<ChatAnswer, TransportError>>>,
    clear: Mutex<VecDeque<Result<ClearReceipt, TransportError>>>,
    upload: Mutex<VecDeque<Result<UploadReceipt, TransportError>>>,
    sent: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub(crate) fn new(journal: Journal) -> Self {
        Self {
            journal,
            chat: Mutex::new(VecDeque::new()),
            clear: Mutex::new(VecDeque::new()),
            upload: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn reply(self, result: Result<ChatAnswer, TransportError>) -> Self {
        self.chat.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn reply_text(self, text: &str) -> Self {
        self.reply(Ok(ChatAnswer {
            response: text.to_string(),
            processing_time: None,
        }))
    }

    pub(crate) fn clear_result(self, result: Result<ClearReceipt, TransportError>) -> Self {
        self.clear.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn upload_result(self, result: Result<UploadReceipt, TransportError>) -> Self {
        self.upload.lock().unwrap().push_back(result);
        self
    }

    /// send_chat_message に渡された本文
    pub(crate) fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.journal.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl ChatTransport for FakeTransport {
    async fn send_chat_message(&self, text: &str) -> Result<ChatAnswer, TransportError> {
        self.record(format!("transport:chat:{}", text));
        self.sent.lock().unwrap().push(text.to_string());
        self.chat
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".into())))
    }

    async fn clear_session(&self) -> Result<ClearReceipt, TransportError> {
        self.record("transport:clear".into());
        self.clear
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(ClearReceipt::default()))
    }
}

#[async_trait]
impl DocumentUploader for FakeTransport {
    async fn upload_document(&self, file: &UploadFile) -> Result<UploadReceipt, TransportError> {
        self.record(format!("transport:upload:{}", file.filename()));
        self.upload
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(UploadReceipt {
                    filename: file.filename().to_string(),
                    chunks: 1,
                })
            })
    }
}

/// 応答が返ってこないサーバ。呼ばれたことだけ記録する。
pub(crate) struct PendingTransport {
    journal: Journal,
}

impl PendingTransport {
    pub(crate) fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

#[async_trait]
impl ChatTransport for PendingTransport {
    async fn send_chat_message(&self, text: &str) -> Result<ChatAnswer, TransportError> {
        self.journal
            .lock()
            .unwrap()
            .push(format!("transport:chat:{}", text));
        std::future::pending().await
    }

    async fn clear_session(&self) -> Result<ClearReceipt, TransportError> {
        self.journal.lock().unwrap().push("transport:clear".into());
        std::future::pending().await
    }
}

/// 決まった答えを返す確認プロンプト（問われた文言を記録する）
pub(crate) struct ScriptedConfirm {
    answer: Result<bool, Error>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub(crate) fn answering(answer: bool) -> Self {
        Self {
            answer: Ok(answer),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            answer: Err(Error::io_msg("stdin closed")),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl ConfirmPrompt for ScriptedConfirm {
    fn confirm(&self, question: &str) -> Result<bool, Error> {
        self.asked.lock().unwrap().push(question.to_string());
        self.answer.clone()
    }
}

/// メモリ上の ThemeStore
#[derive(Default)]
pub(crate) struct MemoryThemeStore {
    saved: Mutex<Option<Theme>>,
}

impl MemoryThemeStore {
    pub(crate) fn with(theme: Theme) -> Self {
        Self {
            saved: Mutex::new(Some(theme)),
        }
    }

    pub(crate) fn saved(&self) -> Option<Theme> {
        *self.saved.lock().unwrap()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<Theme>, Error> {
        Ok(self.saved())
    }

    fn save(&self, theme: Theme) -> Result<(), Error> {
        *self.saved.lock().unwrap() = Some(theme);
        Ok(())
    }
}

/// コントローラとフェイク一式
pub(crate) struct Harness {
    pub(crate) journal: Journal,
    pub(crate) renderer: Arc<FakeRenderer>,
    pub(crate) transport: Arc<FakeTransport>,
    pub(crate) confirm: Arc<ScriptedConfirm>,
}

impl Harness {
    pub(crate) fn new(script: impl FnOnce(FakeTransport) -> FakeTransport) -> Self {
        Self::with_confirm(script, ScriptedConfirm::answering(true))
    }

    pub(crate) fn with_confirm(
        script: impl FnOnce(FakeTransport) -> FakeTransport,
        confirm: ScriptedConfirm,
    ) -> Self {
        let journal: Journal = Arc::new(Mutex::new(Vec::new()));
        Self {
            renderer: Arc::new(FakeRenderer::new(Arc::clone(&journal))),
            transport: Arc::new(script(FakeTransport::new(Arc::clone(&journal)))),
            confirm: Arc::new(confirm),
            journal,
        }
    }

    /// 既定の候補・クイックリプライで組み立てる（表示件数 10）
    pub(crate) fn controller(&self) -> ChatController {
        self.controller_with(SuggestionPool::default(), 10)
    }

    pub(crate) fn controller_with(&self, pool: SuggestionPool, count: usize) -> ChatController {
        ChatController::new(
            SessionState::new(pool, fixed_clock()),
            QuickReplies::default(),
            count,
            Arc::clone(&self.renderer) as Arc<dyn Renderer>,
            Arc::clone(&self.transport) as Arc<dyn ChatTransport>,
            Arc::clone(&self.confirm) as Arc<dyn ConfirmPrompt>,
            Arc::new(NoopLog),
        )
    }

    pub(crate) fn transport_calls(&self) -> usize {
        entries(&self.journal)
            .iter()
            .filter(|e| e.starts_with("transport:"))
            .count()
    }
}
