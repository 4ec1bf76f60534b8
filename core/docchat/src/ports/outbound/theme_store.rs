//! テーマ設定の保存先 Outbound ポート

use crate::domain::Theme;
use common::error::Error;

pub trait ThemeStore: Send + Sync {
    /// 保存済みのテーマ。未保存なら None。
    fn load(&self) -> Result<Option<Theme>, Error>;

    fn save(&self, theme: Theme) -> Result<(), Error>;
}
