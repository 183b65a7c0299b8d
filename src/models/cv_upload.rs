use bytes::Bytes;

use crate::error::{Error, Result};

pub const TEXT_PLAIN: &str = "text/plain";

/// A CV file as handed over by the browser: name, declared MIME type, raw bytes.
#[derive(Debug, Clone)]
pub struct CvUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl CvUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes: bytes.into(),
        }
    }

    pub fn is_plain_text(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|mime| mime.trim().eq_ignore_ascii_case(TEXT_PLAIN))
            .unwrap_or(false)
    }

    /// Reads the upload as text. Anything not declared `text/plain`, or not
    /// valid UTF-8, is refused rather than decoded lossily.
    pub fn read_text(&self) -> Result<String> {
        if !self.is_plain_text() {
            return Err(Error::Extraction(
                "Cannot read binary file as text".to_string(),
            ));
        }
        String::from_utf8(self.bytes.to_vec())
            .map_err(|_| Error::Extraction("Could not read file".to_string()))
    }
}
