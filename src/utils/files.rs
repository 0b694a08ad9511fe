use bytes::Bytes;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::path::Path;
use url::Url;

use crate::error::{Error, Result};

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TXT: &str = "text/plain";

/// A file picked for upload, held in memory until the multipart request is built.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::NotFound(format!("No file name in {}", path.display())))?
            .to_string();
        let mime_type = mime_from_extension(&file_name).to_string();
        Ok(Self::new(file_name, mime_type, data))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Validation errors carry the file's metadata, never its contents.
impl Serialize for FileUpload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FileUpload", 3)?;
        state.serialize_field("file_name", &self.file_name)?;
        state.serialize_field("mime_type", &self.mime_type)?;
        state.serialize_field("size", &self.size())?;
        state.end()
    }
}

pub fn mime_from_extension(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => MIME_PDF,
        "doc" => MIME_DOC,
        "docx" => MIME_DOCX,
        "txt" => MIME_TXT,
        _ => "application/octet-stream",
    }
}

/// Turns a stored file reference (`public\uploads\cv.pdf`) into a fetchable URL.
pub fn file_url(base: &Url, stored_path: &str) -> Result<Url> {
    let normalized = stored_path.replace('\\', "/");
    let normalized = normalized.replacen("public/", "", 1);
    Ok(base.join(normalized.trim_start_matches('/'))?)
}
