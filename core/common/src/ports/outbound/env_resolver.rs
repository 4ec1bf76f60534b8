//! 環境変数解決 Outbound ポート
//!
//! 設定・状態ディレクトリとサーバ URL を環境変数から解決する。
//! usecase / wiring はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::{Dirs, HomeDir, ServerUrl};
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
pub trait EnvResolver: Send + Sync {
    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. DOCCHAT_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/docchat
    /// 3. $HOME/.config/docchat
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// config / state ディレクトリをまとめて解決する
    ///
    /// state は DOCCHAT_STATE_DIR → $XDG_STATE_HOME/docchat → $HOME/.local/state/docchat の順。
    fn resolve_dirs(&self) -> Result<Dirs, Error>;

    /// DOCCHAT_SERVER が設定されていればそのサーバ URL
    fn server_url_from_env(&self) -> Option<ServerUrl>;

    /// 端末の背景が暗いか（COLORFGBG の背景色から推定。判定できなければ None）
    fn prefers_dark(&self) -> Option<bool>;
}
