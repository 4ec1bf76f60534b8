//! docchat 共通ライブラリ
//!
//! エラー型・ドメインの Newtype・ログ/時刻/環境変数の Outbound ポートと標準アダプタを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// Outbound ポート（trait）
pub mod ports;

/// ポートの標準実装
pub mod adapter;
