//! 候補質問プール（ローテーション方針付き）
//!
//! asked ⊆ all を保つ。未出題が RESET_THRESHOLD 未満になったら選ぶ前に asked を空に戻す。
//! 選択は宣言順で決定的（シャッフルしない）。

use std::collections::HashSet;

/// 未出題がこの数を下回ったらプールをリセットする
pub const RESET_THRESHOLD: usize = 5;

/// 一度に表示する候補数の既定値
pub const DEFAULT_DISPLAY_COUNT: usize = 10;

/// 設定で上書きされない場合の候補質問
pub const DEFAULT_QUESTIONS: &[&str] = &[
    "What is the company name?",
    "What products does Rubber Bumper sell?",
    "What is Rubber Bumper's market position?",
    "How have the rubber band sales changed over time?",
    "How has the condom market grown?",
    "Which product is more profitable?",
    "What are the profit margins for each product?",
    "Should they convert the rubber band factory?",
    "What are the risks of factory conversion?",
    "Who are the main competitors?",
    "What is the payback period for conversion?",
    "How much would the conversion cost?",
    "What is the current financial status?",
    "What does the president think about conversion?",
    "How many employees work at Rubber Bumper?",
];

#[derive(Debug, Clone)]
pub struct SuggestionPool {
    all: Vec<String>,
    asked: HashSet<String>,
}

impl SuggestionPool {
    /// 空文字と重複（大文字小文字無視）は取り除いて宣言順に保持する
    pub fn new(questions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut seen = HashSet::new();
        let all = questions
            .into_iter()
            .map(Into::into)
            .map(|q: String| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .filter(|q| seen.insert(q.to_lowercase()))
            .collect();
        Self {
            all,
            asked: HashSet::new(),
        }
    }

    pub fn all(&self) -> &[String] {
        &self.all
    }

    pub fn is_asked(&self, question: &str) -> bool {
        self.asked.contains(question)
    }

    pub fn asked_count(&self) -> usize {
        self.asked.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.all.len() - self.asked.len()
    }

    /// text と大文字小文字を無視して一致する候補を出題済みにする。一致しなければ何もしない。
    /// 一致した場合は true。
    pub fn mark_asked(&mut self, text: &str) -> bool {
        let needle = text.trim().to_lowercase();
        match self.all.iter().find(|q| q.to_lowercase() == needle) {
            Some(q) => {
                self.asked.insert(q.clone());
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.asked.clear();
    }

    /// 未出題から最大 n 件を宣言順で返す。未出題が RESET_THRESHOLD 未満なら先にリセットする。
    pub fn select(&mut self, n: usize) -> Vec<String> {
        if self.remaining_count() < RESET_THRESHOLD {
            self.reset();
        }
        self.all
            .iter()
            .filter(|q| !self.asked.contains(*q))
            .take(n)
            .cloned()
            .collect()
    }
}

impl Default for SuggestionPool {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTIONS.iter().copied())
    }
}
