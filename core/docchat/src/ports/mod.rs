//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（描画・通信・確認・テーマ保存）を使うための trait

pub mod inbound;
pub mod outbound;
