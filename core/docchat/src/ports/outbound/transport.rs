//! 通信（Transport Adapter）の Outbound ポート
//!
//! ネットワーク I/O を行ってよいのはこの trait の実装だけ。
//! 結果は成功ペイロードか TransportError のどちらか（例外的な経路は持たない）。

use crate::domain::UploadFile;
use async_trait::async_trait;

/// チャット応答
#[derive(Debug, Clone, PartialEq)]
pub struct ChatAnswer {
    pub response: String,
    /// サーバ側の処理時間（秒）
    pub processing_time: Option<f64>,
}

/// /clear の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearReceipt {
    /// 削除されたキャッシュ件数（表示用）
    pub cache_size: Option<u64>,
}

/// /upload の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub filename: String,
    pub chunks: u64,
}

/// 通信エラー（表示用の文言への変換は usecase が行う）
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// 接続できない・応答が途中で切れた等
    #[error("network error: {0}")]
    Network(String),
    /// 2xx 以外のステータス。ボディが読めれば error / fallback を持つ。
    #[error("HTTP {status}")]
    Status {
        status: u16,
        error: Option<String>,
        fallback: Option<String>,
    },
    /// 2xx だがボディが error を返した
    #[error("server error: {error}")]
    Server {
        error: String,
        fallback: Option<String>,
    },
    /// ボディを解釈できない
    #[error("invalid response: {0}")]
    Decode(String),
    /// 送信前に弾いたファイル
    #[error("{0}")]
    InvalidFile(String),
}

impl TransportError {
    /// サーバが提示した代替メッセージ
    pub fn fallback(&self) -> Option<&str> {
        match self {
            TransportError::Status { fallback, .. } | TransportError::Server { fallback, .. } => {
                fallback.as_deref().filter(|s| !s.trim().is_empty())
            }
            _ => None,
        }
    }
}

/// チャットのリクエスト/応答と履歴クリア
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// `{ "message": text }` を 1 回だけ送る（キューイング・キャンセルはしない）
    async fn send_chat_message(&self, text: &str) -> Result<ChatAnswer, TransportError>;

    /// サーバ側の履歴・キャッシュを消す
    async fn clear_session(&self) -> Result<ClearReceipt, TransportError>;
}

/// PDF のアップロード
#[async_trait]
pub trait DocumentUploader: Send + Sync {
    async fn upload_document(&self, file: &UploadFile) -> Result<UploadReceipt, TransportError>;
}
