//! 破壊的な操作の前にユーザーへ確認する Outbound ポート

use common::error::Error;

/// はい/いいえ をユーザーに問い合わせる能力
///
/// usecase はこの trait にのみ依存し、adapter が stdin/stderr でプロンプトを表示する。
pub trait ConfirmPrompt: Send + Sync {
    /// question を表示し、承認されたら true を返す
    fn confirm(&self, question: &str) -> Result<bool, Error>;
}
