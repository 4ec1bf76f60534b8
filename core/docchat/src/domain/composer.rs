//! 入力欄（textarea 相当）の編集状態
//!
//! Enter（Shift なし）で送信、Shift+Enter は改行を挿入して送信しない。

/// 入力欄へのキー操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// 文字列の入力（貼り付け・1 行分の入力を含む）
    Text(String),
    Backspace,
    Enter { shift: bool },
}

#[derive(Debug, Clone, Default)]
pub struct Composer {
    buffer: String,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// 入力欄の値を置き換える（候補クリック時）
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// キーを適用する。送信が確定したら入力欄の内容を返し、入力欄を空にする。
    ///
    /// 空白のみかどうかの判定は呼び出し側（送信処理）で行う。
    pub fn press(&mut self, key: Key) -> Option<String> {
        match key {
            Key::Text(s) => {
                self.buffer.push_str(&s);
                None
            }
            Key::Backspace => {
                self.buffer.pop();
                None
            }
            Key::Enter { shift: true } => {
                self.buffer.push('\n');
                None
            }
            Key::Enter { shift: false } => Some(std::mem::take(&mut self.buffer)),
        }
    }
}
