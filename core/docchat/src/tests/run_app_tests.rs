use super::FakeRenderer;
use crate::cli::Config;
use crate::ports::inbound::UseCaseRunner;
use crate::ports::outbound::Renderer;
use crate::wiring;
use common::domain::{Dirs, HomeDir, ServerUrl};
use common::error::Error;
use common::ports::outbound::EnvResolver;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// 一時ディレクトリを config / state として返す EnvResolver
struct TempEnvResolver {
    root: PathBuf,
    server: Option<ServerUrl>,
}

impl EnvResolver for TempEnvResolver {
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        Ok(HomeDir::new(self.root.join("config")))
    }

    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        Ok(Dirs {
            config_dir: self.root.join("config"),
            state_dir: self.root.join("state"),
        })
    }

    fn server_url_from_env(&self) -> Option<ServerUrl> {
        self.server.clone()
    }

    fn prefers_dark(&self) -> Option<bool> {
        None
    }
}

/// 誰も待ち受けていないサーバ URL
fn closed_server() -> ServerUrl {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    ServerUrl::new(format!("http://{}", addr))
}

/// 一時ディレクトリ上で App を組み立て、Runner で run する（テスト用の入口）
fn run_app(root: &Path, config: Config) -> (Result<i32, Error>, Arc<FakeRenderer>) {
    let renderer = Arc::new(FakeRenderer::new(Arc::new(Mutex::new(Vec::new()))));
    let env = Arc::new(TempEnvResolver {
        root: root.to_path_buf(),
        server: Some(closed_server()),
    });
    let result = wiring::wire_docchat_with(
        &config,
        env,
        Arc::clone(&renderer) as Arc<dyn Renderer>,
    )
    .and_then(|app| crate::Runner { app }.run(config));
    (result, renderer)
}

#[test]
fn test_run_app_with_help() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        help: true,
        ..Default::default()
    };
    let (result, _) = run_app(dir.path(), config);
    assert_eq!(result.unwrap(), 0);
}

#[test]
fn test_run_app_writes_lifecycle_log() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        help: true,
        ..Default::default()
    };
    run_app(dir.path(), config).0.unwrap();

    let log = std::fs::read_to_string(dir.path().join("state/logs/docchat.jsonl")).unwrap();
    assert!(log.contains("\"command started\""));
    assert!(log.contains("\"command finished\""));
    assert!(log.contains("\"layer\":\"cli\""));
}

#[test]
fn test_run_app_ask_against_unreachable_server() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        message_args: vec!["What".into(), "is".into(), "this?".into()],
        ..Default::default()
    };
    let (result, renderer) = run_app(dir.path(), config);

    assert_eq!(result.unwrap(), 1);
    let messages = renderer.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content(), "What is this?");
    assert_eq!(renderer.typing_placeholders(), 0);
}

#[test]
fn test_run_app_upload_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        upload: Some(dir.path().join("nope.pdf")),
        ..Default::default()
    };
    let err = run_app(dir.path(), config).0.unwrap_err();
    assert_eq!(err.exit_code(), 74);
}

#[test]
fn test_run_app_upload_rejects_non_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "plain text").unwrap();
    let config = Config {
        upload: Some(path),
        ..Default::default()
    };
    let (result, renderer) = run_app(dir.path(), config);

    assert_eq!(result.unwrap(), 1);
    assert_eq!(renderer.alerts(), vec!["Please upload a PDF file".to_string()]);
}

#[test]
fn test_run_app_clear_non_interactive_is_declined() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        clear: true,
        non_interactive: true,
        ..Default::default()
    };
    let (result, renderer) = run_app(dir.path(), config);

    assert_eq!(result.unwrap(), 0);
    assert!(renderer.alerts().is_empty());
}

#[test]
fn test_run_app_clear_failure_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        clear: true,
        yes: true,
        ..Default::default()
    };
    let (result, renderer) = run_app(dir.path(), config);

    assert_eq!(result.unwrap(), 1);
    assert!(renderer.alerts()[0].starts_with("Failed to clear data:"));
}

#[test]
fn test_run_app_theme_is_saved() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        help: true,
        theme: Some(crate::domain::Theme::Dark),
        ..Default::default()
    };
    run_app(dir.path(), config).0.unwrap();
    // help ではテーマを適用しない
    assert!(!dir.path().join("state/theme").exists());

    let config = Config {
        clear: true,
        non_interactive: true,
        theme: Some(crate::domain::Theme::Dark),
        ..Default::default()
    };
    let (_, renderer) = run_app(dir.path(), config);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("state/theme")).unwrap(),
        "dark"
    );
    assert_eq!(renderer.theme(), Some(crate::domain::Theme::Dark));
}

#[test]
fn test_run_app_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("config")).unwrap();
    std::fs::write(dir.path().join("config/config.json"), "{ broken").unwrap();
    let err = run_app(dir.path(), Config::default()).0.unwrap_err();
    assert!(err.to_string().contains("config.json"));
    assert_eq!(err.exit_code(), 70);
}
