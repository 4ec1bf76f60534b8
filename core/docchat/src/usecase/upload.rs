//! PDF アップロードのユースケース
//!
//! PDF 以外は通信前に弾いてアラートを出す。成功時はドキュメント一覧とお知らせを描画する
//! （お知らせはチャット履歴には入れない）。

use crate::domain::{ChatMessage, Role, UploadFile};
use crate::ports::outbound::{DocumentUploader, Renderer, TransportError, UploadReceipt};
use crate::usecase::guards::LoadingGuard;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};
use std::sync::Arc;

pub const NOT_PDF_ALERT: &str = "Please upload a PDF file";

pub fn processed_notice(receipt: &UploadReceipt) -> String {
    format!(
        "I've processed \"{}\" with {} text chunks. You can now ask me questions about the content!",
        receipt.filename, receipt.chunks
    )
}

pub struct UploadUseCase {
    uploader: Arc<dyn DocumentUploader>,
    renderer: Arc<dyn Renderer>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
}

impl UploadUseCase {
    pub fn new(
        uploader: Arc<dyn DocumentUploader>,
        renderer: Arc<dyn Renderer>,
        clock: Arc<dyn Clock>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            uploader,
            renderer,
            clock,
            log,
        }
    }

    pub async fn run(&self, file: UploadFile) -> Result<UploadReceipt, TransportError> {
        if !file.is_pdf() {
            self.renderer.alert(NOT_PDF_ALERT);
            return Err(TransportError::InvalidFile(NOT_PDF_ALERT.to_string()));
        }

        let result = {
            let _loading = LoadingGuard::show(
                self.renderer.as_ref(),
                &format!("Uploading {}...", file.filename()),
            );
            self.uploader.upload_document(&file).await
        };

        match &result {
            Ok(receipt) => {
                self.renderer.add_document(&receipt.filename);
                let notice = ChatMessage::new(Role::Bot, processed_notice(receipt), self.clock.now());
                self.renderer.render_message(&notice);
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "usecase", "upload", "document uploaded")
                        .field("filename", receipt.filename.as_str())
                        .field("chunks", receipt.chunks),
                );
            }
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "usecase", "upload", "upload failed")
                        .field("filename", file.filename())
                        .field("error", e.to_string()),
                );
                self.renderer
                    .alert(&format!("Failed to upload file: {}", e));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processed_notice() {
        let receipt = UploadReceipt {
            filename: "case.pdf".into(),
            chunks: 42,
        };
        assert_eq!(
            processed_notice(&receipt),
            "I've processed \"case.pdf\" with 42 text chunks. You can now ask me questions about the content!"
        );
    }
}
