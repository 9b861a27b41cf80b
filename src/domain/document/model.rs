use super::error::ExtractionError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_HTML: &str = "text/html";

/// An uploaded document, before extraction
#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    /// Build a document from its name and contents, resolving the MIME type from the extension
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ExtractionError> {
        let file_name = file_name.into();
        let mime_type = mime_type_for(&file_name)
            .ok_or_else(|| ExtractionError::UnsupportedFormat(file_name.clone()))?;

        if bytes.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        Ok(Self {
            file_name,
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    pub async fn read(path: &Path) -> Result<Self, ExtractionError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Reject unknown formats before touching the disk
        mime_type_for(&file_name)
            .ok_or_else(|| ExtractionError::UnsupportedFormat(file_name.clone()))?;

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("could not read {}", path.display()))?;
        Self::new(file_name, bytes)
    }

    pub fn is_text(&self) -> bool {
        self.mime_type.starts_with("text/")
    }

    pub fn is_html(&self) -> bool {
        self.mime_type == MIME_HTML
    }
}

/// Resolve a supported MIME type from a file name's extension
pub fn mime_type_for(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name)
        .extension()?
        .to_string_lossy()
        .to_ascii_lowercase();

    match extension.as_str() {
        "pdf" => Some(MIME_PDF),
        "docx" => Some(MIME_DOCX),
        "txt" | "md" => Some(MIME_TEXT),
        "html" | "htm" => Some(MIME_HTML),
        _ => None,
    }
}

/// Extracted, cleaned text and the language it is written in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub text: String,
    pub detected_language: String,
}
