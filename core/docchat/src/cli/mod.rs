//! CLI 層: 引数解析と対話ループ

pub mod args;
pub mod repl;

pub use args::{config_to_command, parse_args, print_completion, print_help, print_usage, Config, ParseOutcome};
pub use repl::Repl;
