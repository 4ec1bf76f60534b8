//! 実行時ディレクトリ（XDG / DOCCHAT_HOME 解決結果）
//!
//! EnvResolver::resolve_dirs() で取得し、設定ファイル・ログ・テーマのパス計算に使う。

use std::path::PathBuf;

/// 解決済みの config / state ディレクトリ
#[derive(Debug, Clone)]
pub struct Dirs {
    pub config_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl Dirs {
    /// 設定ファイル（config.json）
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// ログ格納ディレクトリ
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }

    /// JSONL ログファイル
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("docchat.jsonl")
    }

    /// テーマ（dark / light）を保存するファイル
    pub fn theme_file(&self) -> PathBuf {
        self.state_dir.join("theme")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_paths() {
        let dirs = Dirs {
            config_dir: PathBuf::from("/tmp/cfg"),
            state_dir: PathBuf::from("/tmp/state"),
        };
        assert_eq!(dirs.config_file(), PathBuf::from("/tmp/cfg/config.json"));
        assert_eq!(dirs.log_file(), PathBuf::from("/tmp/state/logs/docchat.jsonl"));
        assert_eq!(dirs.theme_file(), PathBuf::from("/tmp/state/theme"));
    }
}
