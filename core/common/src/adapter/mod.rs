//! アダプター（Outbound ポートの標準実装）
//!
//! usecase はポートの trait 経由でのみ時刻・環境変数・ログに触れる。
//! 実装は標準実装（Std*）やテスト用の固定値を注入する。

pub mod file_json_log;
pub mod human_log;
pub mod std_clock;
pub mod std_env_resolver;

pub use file_json_log::{FileJsonLog, NoopLog, TeeLog};
pub use human_log::StderrLog;
pub use std_clock::{FixedClock, StdClock};
pub use std_env_resolver::StdEnvResolver;
