//! 描画エンジンの Outbound ポート
//!
//! usecase はこの trait にのみ依存し、端末・HTML などの描画先を知らない。
//! 描画の失敗はセッションを止めないため、mount 以外は戻り値を持たない。

use crate::domain::{ChatMessage, Theme};
use common::error::Error;

/// トランスクリプト・入力中表示・候補一覧を描画する能力
///
/// メソッドは `&self`。描画先の状態（入力中プレースホルダ等）は実装側が内部可変性で持つ。
pub trait Renderer: Send + Sync {
    /// 初回だけ呼ぶ初期化。描画先が使えなければ Err を返す。ウェルカム表示もここで行う。
    fn mount(&self) -> Result<(), Error>;

    /// メッセージを末尾に追加し、最下部までスクロールする
    fn render_message(&self, message: &ChatMessage);

    /// 応答待ちのプレースホルダを出す（未解決のリクエストにつき 1 回だけ呼ばれる）
    fn show_typing(&self);

    /// プレースホルダを消す。無ければ何もしない（冪等）。
    fn hide_typing(&self);

    /// 候補質問の表示を list で置き換える
    fn render_suggestions(&self, list: &[String]);

    /// クイックリプライの表示を list で置き換える
    fn render_quick_replies(&self, list: &[String]);

    /// 操作をブロックするローディング表示
    fn show_loading(&self, label: &str);

    /// ローディング表示を消す（冪等）
    fn hide_loading(&self);

    /// ブロッキングなアラート
    fn alert(&self, text: &str);

    /// ウェルカム表示だけを残してトランスクリプトを空にする
    fn reset_transcript(&self);

    /// アップロード済みドキュメント一覧に追加する
    fn add_document(&self, filename: &str);

    fn apply_theme(&self, theme: Theme);
}
