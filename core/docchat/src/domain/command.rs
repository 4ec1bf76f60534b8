//! CLI から解決されるコマンドと、対話中の入力イベント

use super::composer::Key;
use std::path::PathBuf;

/// CLI 引数から決まる実行モード（match は main レイヤーに集約）
#[derive(Debug, Clone, PartialEq)]
pub enum DocChatCommand {
    Help,
    /// 対話セッション
    Interactive,
    /// 1 メッセージだけ送って応答を表示する
    Ask { message: String },
    Upload { path: PathBuf },
    Clear,
}

impl DocChatCommand {
    pub fn name(&self) -> &'static str {
        match self {
            DocChatCommand::Help => "help",
            DocChatCommand::Interactive => "interactive",
            DocChatCommand::Ask { .. } => "ask",
            DocChatCommand::Upload { .. } => "upload",
            DocChatCommand::Clear => "clear",
        }
    }
}

/// 入力コントローラが受け付けるイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// 候補質問のクリック（その文言を入力して送信したのと同じ）
    SuggestionClicked(String),
    /// クイックリプライのクリック（0 始まりの表示位置）
    QuickReplyClicked(usize),
    ClearRequested,
}
