//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, StderrLog, StdClock, StdEnvResolver, TeeLog};
use common::error::Error;
use common::ports::outbound::{Clock, EnvResolver, Log, LogLevel};

use crate::adapter::{
    load_file_config, resolve_settings, AutoConfirm, CliConfirmPrompt, CompositeRenderer,
    FileThemeStore, HtmlTranscriptRenderer, HttpTransport, NonInteractiveConfirm, TerminalMode,
    TerminalRenderer,
};
use crate::cli::Config;
use crate::domain::{QuickReplies, Settings, SuggestionPool};
use crate::ports::outbound::{ChatTransport, ConfirmPrompt, DocumentUploader, Renderer, ThemeStore};
use crate::usecase::{ChatController, SessionState, ThemeUseCase, UploadUseCase};

/// 配線で組み立てたポート群（main の Command ディスパッチで利用）
pub struct App {
    pub settings: Settings,
    pub logger: Arc<dyn Log>,
    pub clock: Arc<dyn Clock>,
    pub renderer: Arc<dyn Renderer>,
    pub transport: Arc<HttpTransport>,
    pub confirm: Arc<dyn ConfirmPrompt>,
    pub theme_store: Arc<dyn ThemeStore>,
    pub prefers_dark: Option<bool>,
}

impl App {
    pub fn chat_controller(&self) -> ChatController {
        let session = SessionState::new(
            SuggestionPool::new(self.settings.suggestions.iter().cloned()),
            Arc::clone(&self.clock),
        );
        ChatController::new(
            session,
            QuickReplies::new(self.settings.quick_replies.iter().cloned()),
            self.settings.suggestion_count,
            Arc::clone(&self.renderer),
            Arc::clone(&self.transport) as Arc<dyn ChatTransport>,
            Arc::clone(&self.confirm),
            Arc::clone(&self.logger),
        )
    }

    pub fn upload_use_case(&self) -> UploadUseCase {
        UploadUseCase::new(
            Arc::clone(&self.transport) as Arc<dyn DocumentUploader>,
            Arc::clone(&self.renderer),
            Arc::clone(&self.clock),
            Arc::clone(&self.logger),
        )
    }

    /// 保存済みテーマを読み込んで描画先に適用する
    pub fn theme_use_case(&self) -> ThemeUseCase {
        ThemeUseCase::new(
            Arc::clone(&self.theme_store),
            Arc::clone(&self.renderer),
            Arc::clone(&self.logger),
            self.prefers_dark,
        )
    }
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_docchat(config: &Config, mode: TerminalMode) -> Result<App, Error> {
    let renderer: Arc<dyn Renderer> = Arc::new(TerminalRenderer::stdout(mode));
    wire_docchat_with(config, Arc::new(StdEnvResolver), renderer)
}

/// 環境変数解決と端末側の描画先を差し替えられる配線（テストからも使う）
pub fn wire_docchat_with(
    config: &Config,
    env_resolver: Arc<dyn EnvResolver>,
    terminal: Arc<dyn Renderer>,
) -> Result<App, Error> {
    let dirs = env_resolver.resolve_dirs()?;

    let file_log: Arc<dyn Log> = Arc::new(FileJsonLog::new(dirs.log_file()));
    let logger: Arc<dyn Log> = if config.verbose {
        Arc::new(TeeLog::new(vec![
            file_log,
            Arc::new(StderrLog::new(LogLevel::Debug)),
        ]))
    } else {
        file_log
    };

    let file_config = load_file_config(&dirs.config_file())?;
    let settings = resolve_settings(
        &config.overrides(),
        env_resolver.server_url_from_env(),
        file_config,
    )?;

    let renderer: Arc<dyn Renderer> = match &settings.transcript_html {
        Some(path) => Arc::new(CompositeRenderer::new(vec![
            terminal,
            Arc::new(HtmlTranscriptRenderer::new(path, Arc::clone(&logger))),
        ])),
        None => terminal,
    };

    let transport = Arc::new(HttpTransport::new(
        settings.server_url.clone(),
        settings.endpoint,
        Arc::clone(&logger),
    )?);

    let confirm: Arc<dyn ConfirmPrompt> = if config.yes {
        Arc::new(AutoConfirm)
    } else if config.non_interactive {
        Arc::new(NonInteractiveConfirm)
    } else {
        Arc::new(CliConfirmPrompt::new())
    };

    Ok(App {
        settings,
        logger,
        clock: Arc::new(StdClock),
        renderer,
        transport,
        confirm,
        theme_store: Arc::new(FileThemeStore::new(dirs.theme_file())),
        prefers_dark: env_resolver.prefers_dark(),
    })
}
