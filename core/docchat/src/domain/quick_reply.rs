//! クイックリプライ（一度使うとセッション中は表示から消える）

/// 設定で上書きされない場合のクイックリプライ
pub const DEFAULT_QUICK_REPLIES: &[&str] = &[
    "Summarize the document",
    "What are the key findings?",
    "What are the main risks?",
];

#[derive(Debug, Clone)]
pub struct QuickReplies {
    items: Vec<String>,
}

impl QuickReplies {
    pub fn new(items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.trim().is_empty())
                .collect(),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// index 番目（0 始まり）を取り出して一覧から消す
    pub fn take(&mut self, index: usize) -> Option<String> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }
}

impl Default for QuickReplies {
    fn default() -> Self {
        Self::new(DEFAULT_QUICK_REPLIES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_removes_item() {
        let mut q = QuickReplies::new(vec!["a", "b", "c"]);
        assert_eq!(q.take(1), Some("b".to_string()));
        assert_eq!(q.items(), &["a".to_string(), "c".to_string()]);
        assert_eq!(q.take(5), None);
    }

    #[test]
    fn test_blank_items_dropped() {
        let q = QuickReplies::new(vec!["a", "  "]);
        assert_eq!(q.items().len(), 1);
    }
}
