//! 対話セッションの入力ループ
//!
//! 1 行をテキスト入力か `/` コマンドとして解釈し、入力コントローラへのイベントに変換する。
//! 行末の `\` は Shift+Enter（改行して入力を続ける）、先頭の `//` は `/` で始まる本文。

use crate::adapter::read_upload_file;
use crate::domain::{InputEvent, Key, Theme};
use crate::ports::outbound::Renderer;
use crate::usecase::{ChatController, ThemeUseCase, UploadUseCase};
use common::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// 表示中の候補質問（1 始まり）を送る
    Ask(usize),
    /// クイックリプライ（1 始まり）を送る
    Reply(usize),
    Clear,
    Upload(PathBuf),
    /// 指定なしなら切り替え
    Theme(Option<Theme>),
    Suggest,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplLine {
    /// 入力して送信
    Text(String),
    /// 入力して改行（まだ送信しない）
    Continued(String),
    Command(ReplCommand),
    /// 解釈できないコマンド（表示する文言）
    Invalid(String),
}

fn text_line(line: &str) -> ReplLine {
    match line.strip_suffix('\\') {
        Some(text) => ReplLine::Continued(text.to_string()),
        None => ReplLine::Text(line.to_string()),
    }
}

fn parse_index(name: &str, arg: Option<&str>) -> ReplLine {
    match arg.and_then(|s| s.parse::<usize>().ok()).filter(|n| *n >= 1) {
        Some(n) if name == "ask" => ReplLine::Command(ReplCommand::Ask(n)),
        Some(n) => ReplLine::Command(ReplCommand::Reply(n)),
        None => ReplLine::Invalid(format!("Usage: /{} N", name)),
    }
}

fn parse_command(body: &str) -> ReplLine {
    let body = body.trim();
    let (name, rest) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (body, ""),
    };
    let arg = if rest.is_empty() { None } else { Some(rest) };

    match name {
        "ask" | "reply" => parse_index(name, arg),
        "clear" => ReplLine::Command(ReplCommand::Clear),
        "upload" => match arg {
            Some(path) => ReplLine::Command(ReplCommand::Upload(PathBuf::from(path))),
            None => ReplLine::Invalid("Usage: /upload PATH".to_string()),
        },
        "theme" => match arg.map(|s| s.parse::<Theme>()) {
            None => ReplLine::Command(ReplCommand::Theme(None)),
            Some(Ok(theme)) => ReplLine::Command(ReplCommand::Theme(Some(theme))),
            Some(Err(e)) => ReplLine::Invalid(e),
        },
        "suggest" => ReplLine::Command(ReplCommand::Suggest),
        "help" => ReplLine::Command(ReplCommand::Help),
        "quit" | "exit" => ReplLine::Command(ReplCommand::Quit),
        "" => ReplLine::Invalid("Type /help for commands".to_string()),
        other => ReplLine::Invalid(format!("Unknown command: /{} (type /help)", other)),
    }
}

/// 1 行（改行付きでもよい）を解釈する
pub fn parse_line(line: &str) -> ReplLine {
    let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
    if let Some(rest) = line.strip_prefix("//") {
        return text_line(&format!("/{}", rest));
    }
    if let Some(body) = line.strip_prefix('/') {
        return parse_command(body);
    }
    text_line(line)
}

const REPL_HELP: &str = "\
Commands:
  /ask N          Send suggested question N
  /reply N        Send quick reply N
  /clear          Clear the chat history
  /upload PATH    Upload a PDF document
  /theme [dark|light]  Toggle or set the color theme
  /suggest        Show suggested questions again
  /help           Show this help
  /quit           Exit
End a line with \\ to continue the message on the next line.
Start a line with // to send a message beginning with /.
";

/// 対話ループ本体。入力の終端か /quit で抜ける。
pub struct Repl {
    controller: ChatController,
    upload: UploadUseCase,
    theme: ThemeUseCase,
    renderer: Arc<dyn Renderer>,
}

impl Repl {
    pub fn new(
        controller: ChatController,
        upload: UploadUseCase,
        theme: ThemeUseCase,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            controller,
            upload,
            theme,
            renderer,
        }
    }

    #[allow(dead_code)]
    pub fn controller(&self) -> &ChatController {
        &self.controller
    }

    #[allow(dead_code)]
    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    /// read_line は 1 行読んでバイト数を返す（0 で終端）。
    ///
    /// 確認プロンプトも標準入力を読むため、入力のロックを持ち続けないよう 1 行ずつ受け取る。
    pub async fn run<F>(&mut self, mut read_line: F, out: &mut dyn Write) -> Result<(), Error>
    where
        F: FnMut(&mut String) -> io::Result<usize>,
    {
        loop {
            let prompt = if self.controller.composer_text().is_empty() { "> " } else { "... " };
            write!(out, "{}", prompt)?;
            out.flush()?;

            let mut line = String::new();
            if read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(());
            }
            if !self.dispatch(parse_line(&line), out).await? {
                return Ok(());
            }
        }
    }

    /// 1 行分を処理する。false なら終了。
    pub async fn dispatch(&mut self, line: ReplLine, out: &mut dyn Write) -> Result<bool, Error> {
        match line {
            ReplLine::Text(text) => {
                self.controller.handle(InputEvent::Key(Key::Text(text))).await;
                self.controller
                    .handle(InputEvent::Key(Key::Enter { shift: false }))
                    .await;
            }
            ReplLine::Continued(text) => {
                self.controller.handle(InputEvent::Key(Key::Text(text))).await;
                self.controller
                    .handle(InputEvent::Key(Key::Enter { shift: true }))
                    .await;
            }
            ReplLine::Invalid(message) => self.renderer.alert(&message),
            ReplLine::Command(command) => return self.run_command(command, out).await,
        }
        Ok(true)
    }

    async fn run_command(&mut self, command: ReplCommand, out: &mut dyn Write) -> Result<bool, Error> {
        match command {
            ReplCommand::Ask(n) => {
                let question = n
                    .checked_sub(1)
                    .and_then(|i| self.controller.displayed_suggestions().get(i).cloned());
                match question {
                    Some(question) => {
                        self.controller
                            .handle(InputEvent::SuggestionClicked(question))
                            .await;
                    }
                    None => self.renderer.alert(&format!("No suggested question #{}", n)),
                }
            }
            ReplCommand::Reply(n) => {
                if n >= 1 && n <= self.controller.quick_replies().len() {
                    self.controller
                        .handle(InputEvent::QuickReplyClicked(n - 1))
                        .await;
                } else {
                    self.renderer.alert(&format!("No quick reply #{}", n));
                }
            }
            ReplCommand::Clear => {
                self.controller.handle(InputEvent::ClearRequested).await;
            }
            ReplCommand::Upload(path) => match read_upload_file(&path) {
                // 失敗はアラートで表示済み
                Ok(file) => {
                    let _ = self.upload.run(file).await;
                }
                Err(e) => self.renderer.alert(&e.to_string()),
            },
            ReplCommand::Theme(theme) => {
                let theme = match theme {
                    Some(theme) => self.theme.set(theme),
                    None => self.theme.toggle(),
                };
                writeln!(out, "Theme: {}", theme.as_str())?;
            }
            ReplCommand::Suggest => self.controller.refresh_suggestions(),
            ReplCommand::Help => write!(out, "{}", REPL_HELP)?,
            ReplCommand::Quit => return Ok(false),
        }
        Ok(true)
    }
}
