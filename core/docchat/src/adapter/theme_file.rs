//! テーマをファイル 1 つ（中身は `dark` / `light`）に保存する ThemeStore

use crate::domain::Theme;
use crate::ports::outbound::ThemeStore;
use common::error::Error;
use std::path::PathBuf;

pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ThemeStore for FileThemeStore {
    /// 未保存・解釈できない値は None
    fn load(&self) -> Result<Option<Theme>, Error> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => Ok(s.parse::<Theme>().ok()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, theme: Theme) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, theme.as_str())?;
        Ok(())
    }
}
