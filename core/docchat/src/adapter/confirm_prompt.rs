//! 確認プロンプトの CLI 実装
//!
//! usecase は ConfirmPrompt trait 経由でのみ利用する。

use crate::ports::outbound::ConfirmPrompt;
use common::error::Error;
use std::io::{self, BufRead, Write};

/// 非対話用: 常に拒否（CI 等でプロンプトを出さない）
#[derive(Debug, Clone, Default)]
pub struct NonInteractiveConfirm;

impl ConfirmPrompt for NonInteractiveConfirm {
    fn confirm(&self, _question: &str) -> Result<bool, Error> {
        Ok(false)
    }
}

/// -y / --yes: 常に承認
#[derive(Debug, Clone, Default)]
pub struct AutoConfirm;

impl ConfirmPrompt for AutoConfirm {
    fn confirm(&self, _question: &str) -> Result<bool, Error> {
        Ok(true)
    }
}

/// 標準入出力で [y/N] を問い合わせる
#[derive(Debug, Clone, Default)]
pub struct CliConfirmPrompt;

impl CliConfirmPrompt {
    pub fn new() -> Self {
        Self
    }
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}

impl ConfirmPrompt for CliConfirmPrompt {
    fn confirm(&self, question: &str) -> Result<bool, Error> {
        eprint!("{} [y/N]: ", question);
        let _ = io::stderr().flush();

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(e.to_string()))?;
        Ok(is_yes(&line))
    }
}
