mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::future::Future;
use std::io;
use std::path::Path;
use std::process;

use adapter::{read_upload_file, TerminalMode};
use cli::{
    config_to_command, parse_args, print_completion, print_help, print_usage, Config,
    ParseOutcome, Repl,
};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::{DocChatCommand, Theme};
use ports::inbound::UseCaseRunner;
use usecase::{Handled, ThemeUseCase};
use wiring::{wire_docchat, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
pub(crate) struct Runner {
    pub(crate) app: App,
}

/// 非同期の処理を current-thread ランタイムで完了まで待つ
fn block_on<F: Future>(future: F) -> Result<F::Output, Error> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::system(format!("failed to start runtime: {}", e)))?;
    Ok(runtime.block_on(future))
}

impl Runner {
    /// 保存済みテーマを適用し、--theme 指定があれば上書き保存する
    fn theme(&self, explicit: Option<Theme>) -> ThemeUseCase {
        let mut theme = self.app.theme_use_case();
        if let Some(t) = explicit {
            theme.set(t);
        }
        theme
    }

    fn run_interactive(&self, explicit_theme: Option<Theme>) -> Result<i32, Error> {
        let theme = self.theme(explicit_theme);
        let mut controller = self.app.chat_controller();
        controller.start()?;
        let mut repl = Repl::new(
            controller,
            self.app.upload_use_case(),
            theme,
            std::sync::Arc::clone(&self.app.renderer),
        );
        let mut stdout = io::stdout();
        block_on(repl.run(|buf| io::stdin().read_line(buf), &mut stdout))??;
        Ok(0)
    }

    fn run_ask(&self, message: &str, explicit_theme: Option<Theme>) -> Result<i32, Error> {
        self.theme(explicit_theme);
        let mut controller = self.app.chat_controller();
        controller.start()?;
        match block_on(controller.send_message(message))? {
            Handled::Replied => Ok(0),
            _ => Ok(1),
        }
    }

    fn run_upload(&self, path: &Path, explicit_theme: Option<Theme>) -> Result<i32, Error> {
        let file = read_upload_file(path)?;
        self.theme(explicit_theme);
        self.app.renderer.mount()?;
        let upload = self.app.upload_use_case();
        match block_on(upload.run(file))? {
            Ok(_) => Ok(0),
            Err(_) => Ok(1),
        }
    }

    fn run_clear(&self, explicit_theme: Option<Theme>) -> Result<i32, Error> {
        self.theme(explicit_theme);
        let mut controller = self.app.chat_controller();
        controller.start()?;
        match block_on(controller.request_clear())? {
            Handled::ClearFailed => Ok(1),
            _ => Ok(0),
        }
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(&config)?;
        let command_name = cmd.name();
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "cli", "lifecycle", "command started")
                .field("command", command_name)
                .field("server", self.app.settings.server_url.as_str())
                .field("endpoint", self.app.settings.endpoint.path()),
        );

        let result = match cmd {
            DocChatCommand::Help => {
                print_help();
                Ok(0)
            }
            DocChatCommand::Interactive => self.run_interactive(config.theme),
            DocChatCommand::Ask { message } => self.run_ask(&message, config.theme),
            DocChatCommand::Upload { path } => self.run_upload(&path, config.theme),
            DocChatCommand::Clear => self.run_clear(config.theme),
        };

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "cli", "lifecycle", "command finished")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self
                .app
                .logger
                .log(&LogRecord::new(LogLevel::Error, "cli", "error", e.to_string()));
        }
        result
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("docchat: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let mode = match config_to_command(&config)? {
        DocChatCommand::Interactive => TerminalMode::Interactive,
        _ => TerminalMode::OneShot,
    };
    let app = wire_docchat(&config, mode)?;
    let runner = Runner { app };
    runner.run(config)
}
