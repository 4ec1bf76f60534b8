//! Outbound ポート: アプリが外界（描画・通信・確認・テーマ保存）を使うための trait

pub mod confirm_prompt;
pub mod renderer;
pub mod theme_store;
pub mod transport;

pub use confirm_prompt::ConfirmPrompt;
pub use renderer::Renderer;
pub use theme_store::ThemeStore;
pub use transport::{
    ChatAnswer, ChatTransport, ClearReceipt, DocumentUploader, TransportError, UploadReceipt,
};
