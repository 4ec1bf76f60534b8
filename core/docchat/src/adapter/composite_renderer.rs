//! 複数の Renderer へ同じ描画を流す

use crate::domain::{ChatMessage, Theme};
use crate::ports::outbound::Renderer;
use common::error::Error;
use std::sync::Arc;

pub struct CompositeRenderer {
    renderers: Vec<Arc<dyn Renderer>>,
}

impl CompositeRenderer {
    pub fn new(renderers: Vec<Arc<dyn Renderer>>) -> Self {
        Self { renderers }
    }
}

impl Renderer for CompositeRenderer {
    /// どれか 1 つでも初期化に失敗したらその時点で Err
    fn mount(&self) -> Result<(), Error> {
        for r in &self.renderers {
            r.mount()?;
        }
        Ok(())
    }

    fn render_message(&self, message: &ChatMessage) {
        self.renderers.iter().for_each(|r| r.render_message(message));
    }

    fn show_typing(&self) {
        self.renderers.iter().for_each(|r| r.show_typing());
    }

    fn hide_typing(&self) {
        self.renderers.iter().for_each(|r| r.hide_typing());
    }

    fn render_suggestions(&self, list: &[String]) {
        self.renderers.iter().for_each(|r| r.render_suggestions(list));
    }

    fn render_quick_replies(&self, list: &[String]) {
        self.renderers.iter().for_each(|r| r.render_quick_replies(list));
    }

    fn show_loading(&self, label: &str) {
        self.renderers.iter().for_each(|r| r.show_loading(label));
    }

    fn hide_loading(&self) {
        self.renderers.iter().for_each(|r| r.hide_loading());
    }

    fn alert(&self, text: &str) {
        self.renderers.iter().for_each(|r| r.alert(text));
    }

    fn reset_transcript(&self) {
        self.renderers.iter().for_each(|r| r.reset_transcript());
    }

    fn add_document(&self, filename: &str) {
        self.renderers.iter().for_each(|r| r.add_document(filename));
    }

    fn apply_theme(&self, theme: Theme) {
        self.renderers.iter().for_each(|r| r.apply_theme(theme));
    }
}
