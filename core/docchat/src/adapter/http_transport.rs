//! reqwest による Transport Adapter
//!
//! `/chat`（または `/chat-api`）・`/clear`・`/upload` を叩き、ステータスとボディを
//! ChatAnswer / ClearReceipt / UploadReceipt か TransportError に正規化する。
//! 2xx 以外はボディの内容にかかわらず失敗。

use crate::domain::{ChatEndpoint, UploadFile};
use crate::ports::outbound::{
    ChatAnswer, ChatTransport, ClearReceipt, DocumentUploader, TransportError, UploadReceipt,
};
use async_trait::async_trait;
use common::domain::ServerUrl;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Default, Deserialize)]
struct ChatReplyBody {
    response: Option<String>,
    processing_time: Option<f64>,
    error: Option<String>,
    fallback_response: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    fallback_response: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ClearReplyBody {
    cache_size: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct UploadReplyBody {
    filename: String,
    chunks: u64,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// 2xx 以外: ボディが JSON なら error / fallback_response を拾う
fn status_error(status: u16, body: &str) -> TransportError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    TransportError::Status {
        status,
        error: parsed.error,
        fallback: parsed.fallback_response,
    }
}

pub(crate) fn decode_chat_reply(status: u16, body: &str) -> Result<ChatAnswer, TransportError> {
    if !is_success(status) {
        return Err(status_error(status, body));
    }
    let parsed: ChatReplyBody = serde_json::from_str(body)
        .map_err(|e| TransportError::Decode(format!("chat response: {}", e)))?;
    match (parsed.response, parsed.error) {
        (Some(response), _) => Ok(ChatAnswer {
            response,
            processing_time: parsed.processing_time,
        }),
        (None, Some(error)) => Err(TransportError::Server {
            error,
            fallback: parsed.fallback_response,
        }),
        (None, None) => Err(TransportError::Decode(
            "chat response has neither response nor error".to_string(),
        )),
    }
}

/// 空ボディは cache_size なしの成功とみなす
pub(crate) fn decode_clear_reply(status: u16, body: &str) -> Result<ClearReceipt, TransportError> {
    if !is_success(status) {
        return Err(status_error(status, body));
    }
    if body.trim().is_empty() {
        return Ok(ClearReceipt::default());
    }
    let parsed: ClearReplyBody = serde_json::from_str(body)
        .map_err(|e| TransportError::Decode(format!("clear response: {}", e)))?;
    Ok(ClearReceipt {
        cache_size: parsed.cache_size,
    })
}

pub(crate) fn decode_upload_reply(
    status: u16,
    body: &str,
) -> Result<UploadReceipt, TransportError> {
    if !is_success(status) {
        return Err(status_error(status, body));
    }
    let parsed: UploadReplyBody = serde_json::from_str(body)
        .map_err(|e| TransportError::Decode(format!("upload response: {}", e)))?;
    Ok(UploadReceipt {
        filename: parsed.filename,
        chunks: parsed.chunks,
    })
}

pub struct HttpTransport {
    client: reqwest::Client,
    server: ServerUrl,
    endpoint: ChatEndpoint,
    log: Arc<dyn Log>,
}

impl HttpTransport {
    /// タイムアウトは設定しない（遅い応答は入力中表示のまま待つ）
    pub fn new(server: ServerUrl, endpoint: ChatEndpoint, log: Arc<dyn Log>) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::http(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            server,
            endpoint,
            log,
        })
    }

    /// リクエストを送り、(ステータス, ボディ) を返す。接続・読み取りの失敗は Network。
    async fn execute(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<(u16, String), TransportError> {
        let started = Instant::now();
        let outcome = async {
            let response = request
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            Ok::<_, TransportError>((status, body))
        }
        .await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let record = match &outcome {
            Ok((status, _)) => LogRecord::new(
                if is_success(*status) { LogLevel::Debug } else { LogLevel::Warn },
                "adapter",
                "transport",
                "request finished",
            )
            .field("status", *status),
            Err(e) => LogRecord::new(LogLevel::Warn, "adapter", "transport", "request failed")
                .field("error", e.to_string()),
        };
        let _ = self
            .log
            .log(&record.field("path", path).field("elapsed_ms", elapsed_ms));
        outcome
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send_chat_message(&self, text: &str) -> Result<ChatAnswer, TransportError> {
        let path = self.endpoint.path();
        let request = self
            .client
            .post(self.server.join(path))
            .json(&serde_json::json!({ "message": text }));
        let (status, body) = self.execute(path, request).await?;
        decode_chat_reply(status, &body)
    }

    async fn clear_session(&self) -> Result<ClearReceipt, TransportError> {
        let request = self
            .client
            .post(self.server.join("/clear"))
            .header("Content-Type", "application/json");
        let (status, body) = self.execute("/clear", request).await?;
        decode_clear_reply(status, &body)
    }
}

#[async_trait]
impl DocumentUploader for HttpTransport {
    async fn upload_document(&self, file: &UploadFile) -> Result<UploadReceipt, TransportError> {
        let part = reqwest::multipart::Part::bytes(file.bytes().to_vec())
            .file_name(file.filename().to_string())
            .mime_str("application/pdf")
            .map_err(|e| TransportError::InvalidFile(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let request = self.client.post(self.server.join("/upload")).multipart(form);
        let (status, body) = self.execute("/upload", request).await?;
        decode_upload_reply(status, &body)
    }
}
