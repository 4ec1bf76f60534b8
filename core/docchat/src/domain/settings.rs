//! 解決済みの実行設定（CLI > 環境変数 > config.json > 既定値）

use super::suggestion::{DEFAULT_DISPLAY_COUNT, DEFAULT_QUESTIONS};
use super::quick_reply::DEFAULT_QUICK_REPLIES;
use common::domain::ServerUrl;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// チャットを送るエンドポイント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatEndpoint {
    #[default]
    Chat,
    ChatApi,
}

impl ChatEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            ChatEndpoint::Chat => "/chat",
            ChatEndpoint::ChatApi => "/chat-api",
        }
    }
}

impl FromStr for ChatEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('/') {
            "chat" => Ok(ChatEndpoint::Chat),
            "chat-api" => Ok(ChatEndpoint::ChatApi),
            other => Err(format!("unknown endpoint: {} (expected chat or chat-api)", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: ServerUrl,
    pub endpoint: ChatEndpoint,
    pub suggestions: Vec<String>,
    pub suggestion_count: usize,
    pub quick_replies: Vec<String>,
    /// HTML トランスクリプトの出力先
    pub transcript_html: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: ServerUrl::new(DEFAULT_SERVER_URL),
            endpoint: ChatEndpoint::default(),
            suggestions: DEFAULT_QUESTIONS.iter().map(|s| s.to_string()).collect(),
            suggestion_count: DEFAULT_DISPLAY_COUNT,
            quick_replies: DEFAULT_QUICK_REPLIES.iter().map(|s| s.to_string()).collect(),
            transcript_html: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_parse() {
        assert_eq!("chat".parse::<ChatEndpoint>().unwrap(), ChatEndpoint::Chat);
        assert_eq!("/chat-api".parse::<ChatEndpoint>().unwrap(), ChatEndpoint::ChatApi);
        assert!("upload".parse::<ChatEndpoint>().is_err());
        assert_eq!(ChatEndpoint::ChatApi.path(), "/chat-api");
    }
}
