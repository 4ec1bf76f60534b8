//! 人間向けログ（LogRecord → stderr へ要点のみ出力）
//!
//! -v 指定時だけ配線される。fields の全量は出さず要点のみ（巨大化防止）。

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};

const FIELDS_SUMMARY_MAX: usize = 400;

/// fields を 1 行に要約する
fn fields_summary(rec: &LogRecord) -> String {
    let Some(fields) = rec.fields.as_ref() else {
        return String::new();
    };
    let s = serde_json::to_string(fields).unwrap_or_default();
    if s.len() <= FIELDS_SUMMARY_MAX {
        return s;
    }
    let truncated = s.chars().take(FIELDS_SUMMARY_MAX).collect::<String>();
    format!("{}... (len={})", truncated, s.len())
}

/// 整形した 1 行（テストしやすいよう出力と分離）
fn format_line(rec: &LogRecord) -> String {
    let mut line = format!("[docchat] {} {}", rec.level.as_str(), rec.message);
    if let Some(kind) = rec.kind.as_deref() {
        line.push_str(&format!(" ({})", kind));
    }
    let summary = fields_summary(rec);
    if !summary.is_empty() {
        line.push(' ');
        line.push_str(&summary);
    }
    line
}

/// stderr へ出力する Log 実装。min_level より詳細なレコードは捨てる。
pub struct StderrLog {
    min_level: LogLevel,
}

impl StderrLog {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        rank(level) <= rank(self.min_level)
    }
}

fn rank(level: LogLevel) -> u8 {
    match level {
        LogLevel::Error => 0,
        LogLevel::Warn => 1,
        LogLevel::Info => 2,
        LogLevel::Debug => 3,
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if self.enabled(record.level) {
            eprintln!("{}", format_line(record));
        }
        Ok(())
    }
}
