//! docchat 固有のドメイン型（型と不変条件）

pub mod command;
pub mod composer;
pub mod history;
pub mod markup;
pub mod message;
pub mod quick_reply;
pub mod settings;
pub mod suggestion;
pub mod theme;
pub mod upload;

pub use command::{DocChatCommand, InputEvent};
pub use composer::{Composer, Key};
pub use history::ChatHistory;
pub use markup::format_content;
pub use message::{ChatMessage, Role};
pub use quick_reply::QuickReplies;
pub use settings::{ChatEndpoint, Settings};
pub use suggestion::SuggestionPool;
pub use theme::Theme;
pub use upload::UploadFile;
