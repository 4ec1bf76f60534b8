//! 表示の後片付けを保証するガード
//!
//! Drop で必ず hide する。成功・失敗・future の破棄のどの経路でも表示が残らない。

use crate::ports::outbound::Renderer;

/// 応答待ちプレースホルダ
pub struct TypingGuard<'a> {
    renderer: &'a dyn Renderer,
}

impl<'a> TypingGuard<'a> {
    pub fn show(renderer: &'a dyn Renderer) -> Self {
        renderer.show_typing();
        Self { renderer }
    }
}

impl Drop for TypingGuard<'_> {
    fn drop(&mut self) {
        self.renderer.hide_typing();
    }
}

/// ブロッキングなローディング表示
pub struct LoadingGuard<'a> {
    renderer: &'a dyn Renderer,
}

impl<'a> LoadingGuard<'a> {
    pub fn show(renderer: &'a dyn Renderer, label: &str) -> Self {
        renderer.show_loading(label);
        Self { renderer }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.renderer.hide_loading();
    }
}
