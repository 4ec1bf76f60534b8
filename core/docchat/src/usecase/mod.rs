//! ユースケース（ポート経由でのみ外界に触れる）

pub mod controller;
pub mod guards;
pub mod session;
pub mod theme;
pub mod upload;

pub use controller::{ChatController, Handled};
pub use session::SessionState;
pub use theme::ThemeUseCase;
pub use upload::UploadUseCase;
