//! Outbound ポートの実装（端末・HTML・HTTP・ファイル）

pub mod composite_renderer;
pub mod config;
pub mod confirm_prompt;
pub mod html_transcript;
pub mod http_transport;
pub mod terminal_renderer;
pub mod theme_file;
pub mod upload_file;

pub use composite_renderer::CompositeRenderer;
pub use config::{load_file_config, resolve_settings, CliOverrides};
pub use confirm_prompt::{AutoConfirm, CliConfirmPrompt, NonInteractiveConfirm};
pub use html_transcript::HtmlTranscriptRenderer;
pub use http_transport::HttpTransport;
pub use terminal_renderer::{TerminalMode, TerminalRenderer};
pub use theme_file::FileThemeStore;
pub use upload_file::read_upload_file;
