//! アップロード対象ファイル（PDF のみ受け付ける）

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    filename: String,
    bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 拡張子 .pdf かつ先頭が `%PDF-` のときだけ PDF とみなす
    pub fn is_pdf(&self) -> bool {
        self.filename.to_lowercase().ends_with(".pdf") && self.bytes.starts_with(PDF_MAGIC)
    }
}
