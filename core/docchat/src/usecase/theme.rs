//! テーマ切り替えのユースケース

use crate::domain::Theme;
use crate::ports::outbound::{Renderer, ThemeStore};
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

pub struct ThemeUseCase {
    current: Theme,
    store: Arc<dyn ThemeStore>,
    renderer: Arc<dyn Renderer>,
    log: Arc<dyn Log>,
}

impl ThemeUseCase {
    /// 保存値 > 端末背景の推定 の順で初期テーマを決めて描画先に適用する
    pub fn new(
        store: Arc<dyn ThemeStore>,
        renderer: Arc<dyn Renderer>,
        log: Arc<dyn Log>,
        prefers_dark: Option<bool>,
    ) -> Self {
        let saved = match store.load() {
            Ok(saved) => saved,
            Err(e) => {
                let _ = log.log(
                    &LogRecord::new(LogLevel::Warn, "usecase", "theme", "failed to load theme")
                        .field("error", e.to_string()),
                );
                None
            }
        };
        let current = Theme::initial(saved, prefers_dark);
        renderer.apply_theme(current);
        Self {
            current,
            store,
            renderer,
            log,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// 明示的に指定して保存する
    pub fn set(&mut self, theme: Theme) -> Theme {
        self.current = theme;
        self.renderer.apply_theme(theme);
        if let Err(e) = self.store.save(theme) {
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Warn, "usecase", "theme", "failed to save theme")
                    .field("error", e.to_string()),
            );
        }
        theme
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.current.toggled())
    }
}
