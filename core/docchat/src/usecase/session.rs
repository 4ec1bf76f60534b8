//! セッション状態（チャット履歴と候補質問プールの唯一の持ち主）
//!
//! ページ（プロセス）ごとに 1 つ作り、コントローラが所有する。

use crate::domain::{ChatHistory, ChatMessage, Role, SuggestionPool};
use common::ports::outbound::Clock;
use std::sync::Arc;

pub struct SessionState {
    history: ChatHistory,
    pool: SuggestionPool,
    clock: Arc<dyn Clock>,
}

impl SessionState {
    pub fn new(pool: SuggestionPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            history: ChatHistory::new(),
            pool,
            clock,
        }
    }

    /// メッセージを作って履歴に追加する。空の本文も拒否しない（検証は呼び出し側）。
    pub fn append_message(&mut self, role: Role, content: impl Into<String>) -> ChatMessage {
        self.append(ChatMessage::new(role, content, self.clock.now()))
    }

    /// サーバ応答を処理時間付きで追加する
    pub fn append_reply(
        &mut self,
        content: impl Into<String>,
        processing_time: Option<f64>,
    ) -> ChatMessage {
        let message =
            ChatMessage::new(Role::Bot, content, self.clock.now()).with_processing_time(processing_time);
        self.append(message)
    }

    fn append(&mut self, message: ChatMessage) -> ChatMessage {
        self.history.push(message.clone());
        message
    }

    /// 履歴と出題済み集合を空にする（冪等）
    pub fn clear(&mut self) {
        self.history.clear();
        self.pool.reset();
    }

    pub fn mark_asked(&mut self, text: &str) -> bool {
        self.pool.mark_asked(text)
    }

    pub fn select_suggestions(&mut self, n: usize) -> Vec<String> {
        self.pool.select(n)
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn pool(&self) -> &SuggestionPool {
        &self.pool
    }
}
