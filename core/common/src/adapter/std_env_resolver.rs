//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::{Dirs, HomeDir, ServerUrl};
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

/// 空文字は未設定として扱う
fn non_empty(get: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    get(key).filter(|s| !s.is_empty())
}

fn home_dir_with(get: &dyn Fn(&str) -> Option<String>) -> Result<PathBuf, Error> {
    if let Some(home) = non_empty(get, "DOCCHAT_HOME") {
        return Ok(PathBuf::from(home));
    }
    let config_base = non_empty(get, "XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty(get, "HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok_or_else(|| Error::env("HOME is not set"))?;
    Ok(config_base.join("docchat"))
}

fn state_dir_with(get: &dyn Fn(&str) -> Option<String>) -> Result<PathBuf, Error> {
    if let Some(dir) = non_empty(get, "DOCCHAT_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let state_base = non_empty(get, "XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty(get, "HOME").map(|h| PathBuf::from(h).join(".local/state")))
        .ok_or_else(|| Error::env("HOME is not set"))?;
    Ok(state_base.join("docchat"))
}

/// COLORFGBG（例: "15;0"）の最後の値を背景色とみなす。0-6 と 8 は暗色。
fn prefers_dark_with(get: &dyn Fn(&str) -> Option<String>) -> Option<bool> {
    let value = non_empty(get, "COLORFGBG")?;
    let bg = value.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    Some(bg <= 6 || bg == 8)
}

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl StdEnvResolver {
    fn get(key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl EnvResolver for StdEnvResolver {
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        home_dir_with(&Self::get).map(HomeDir::new)
    }

    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        Ok(Dirs {
            config_dir: home_dir_with(&Self::get)?,
            state_dir: state_dir_with(&Self::get)?,
        })
    }

    fn server_url_from_env(&self) -> Option<ServerUrl> {
        non_empty(&Self::get, "DOCCHAT_SERVER").map(ServerUrl::new)
    }

    fn prefers_dark(&self) -> Option<bool> {
        prefers_dark_with(&Self::get)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_home_dir_prefers_docchat_home() {
        let get = lookup(&[("DOCCHAT_HOME", "/opt/dc"), ("HOME", "/home/u")]);
        assert_eq!(home_dir_with(&get).unwrap(), PathBuf::from("/opt/dc"));
    }

    #[test]
    fn test_home_dir_falls_back_to_xdg_then_home() {
        let get = lookup(&[("XDG_CONFIG_HOME", "/x"), ("HOME", "/home/u")]);
        assert_eq!(home_dir_with(&get).unwrap(), PathBuf::from("/x/docchat"));

        let get = lookup(&[("DOCCHAT_HOME", ""), ("HOME", "/home/u")]);
        assert_eq!(
            home_dir_with(&get).unwrap(),
            PathBuf::from("/home/u/.config/docchat")
        );
    }

    #[test]
    fn test_home_dir_without_home_is_error() {
        let get = lookup(&[]);
        assert!(home_dir_with(&get).is_err());
    }

    #[test]
    fn test_state_dir_resolution() {
        let get = lookup(&[("HOME", "/home/u")]);
        assert_eq!(
            state_dir_with(&get).unwrap(),
            PathBuf::from("/home/u/.local/state/docchat")
        );
        let get = lookup(&[("DOCCHAT_STATE_DIR", "/s"), ("HOME", "/home/u")]);
        assert_eq!(state_dir_with(&get).unwrap(), PathBuf::from("/s"));
    }

    #[test]
    fn test_prefers_dark_from_colorfgbg() {
        assert_eq!(prefers_dark_with(&lookup(&[("COLORFGBG", "15;0")])), Some(true));
        assert_eq!(prefers_dark_with(&lookup(&[("COLORFGBG", "0;15")])), Some(false));
        assert_eq!(prefers_dark_with(&lookup(&[("COLORFGBG", "15;default;0")])), Some(true));
        assert_eq!(prefers_dark_with(&lookup(&[("COLORFGBG", "junk")])), None);
        assert_eq!(prefers_dark_with(&lookup(&[])), None);
    }
}
