//! アップロードするファイルの読み込み

use crate::domain::UploadFile;
use common::error::Error;
use std::path::Path;

pub fn read_upload_file(path: &Path) -> Result<UploadFile, Error> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::invalid_argument(format!("not a file: {}", path.display())))?;
    let bytes = std::fs::read(path)
        .map_err(|e| Error::io_msg(format!("{}: {}", path.display(), e)))?;
    Ok(UploadFile::new(filename, bytes))
}
