//! チャットメッセージ（作成後は不変）

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// 発言者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }
}

/// トランスクリプトの 1 エントリ
///
/// timestamp は表示専用。並び順は ChatHistory への挿入順で決まる。
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    role: Role,
    content: String,
    timestamp: DateTime<Local>,
    /// サーバが返した処理時間（秒）
    processing_time: Option<f64>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
            processing_time: None,
        }
    }

    pub fn with_processing_time(mut self, secs: Option<f64>) -> Self {
        self.processing_time = secs;
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn processing_time(&self) -> Option<f64> {
        self.processing_time
    }

    /// 表示用の時刻（HH:MM）
    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}
