//! config.json の読み込みと実行設定の解決（adapter 層）
//!
//! 優先順位: CLI 引数 > DOCCHAT_SERVER > config.json > 既定値

use crate::domain::{ChatEndpoint, Settings};
use common::domain::ServerUrl;
use common::error::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// config.json の中身（すべて省略可）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub server_url: Option<String>,
    /// "chat" または "chat-api"
    pub endpoint: Option<String>,
    pub suggestions: Option<Vec<String>>,
    pub suggestion_count: Option<usize>,
    pub quick_replies: Option<Vec<String>>,
    pub transcript_html: Option<PathBuf>,
}

/// CLI 引数で上書きされる項目
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub server_url: Option<String>,
    pub endpoint: Option<ChatEndpoint>,
    pub transcript_html: Option<PathBuf>,
}

/// config.json を読む。ファイルが無ければ既定値。
pub fn load_file_config(path: &Path) -> Result<FileConfig, Error> {
    let content = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(e) => return Err(Error::io_msg(format!("{}: {}", path.display(), e))),
    };
    serde_json::from_str(&content)
        .map_err(|e| Error::json(format!("{}: {}", path.display(), e)))
}

pub fn resolve_settings(
    cli: &CliOverrides,
    env_server: Option<ServerUrl>,
    file: FileConfig,
) -> Result<Settings, Error> {
    let mut settings = Settings::default();

    if let Some(url) = cli
        .server_url
        .as_deref()
        .map(ServerUrl::new)
        .or(env_server)
        .or_else(|| file.server_url.as_deref().map(ServerUrl::new))
    {
        if url.as_str().is_empty() {
            return Err(Error::invalid_argument("server URL must not be empty"));
        }
        settings.server_url = url;
    }

    if let Some(endpoint) = cli.endpoint {
        settings.endpoint = endpoint;
    } else if let Some(s) = file.endpoint.as_deref() {
        settings.endpoint = s.parse().map_err(Error::invalid_argument)?;
    }

    if let Some(list) = file.suggestions {
        settings.suggestions = list;
    }
    if let Some(n) = file.suggestion_count {
        if n == 0 {
            return Err(Error::invalid_argument("suggestion_count must be at least 1"));
        }
        settings.suggestion_count = n;
    }
    if let Some(list) = file.quick_replies {
        settings.quick_replies = list;
    }
    settings.transcript_html = cli.transcript_html.clone().or(file.transcript_html);

    Ok(settings)
}
