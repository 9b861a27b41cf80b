use super::error::ExtractionError;
use super::model::{Document, DocumentFile};
use crate::domain::tts::language::{build_detector, detect_language};
use crate::infrastructure::repositories::DocumentRepository;
use async_trait::async_trait;
use html2text::from_read;
use lingua::LanguageDetector;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Instruction sent along with every remotely extracted document
pub const CLEANING_INSTRUCTION: &str = "Extract all readable text from this document so it can be \
narrated as an audiobook. Remove page numbers, running headers and footers, footnote markers, \
tables of contents and any other artifacts that should not be read aloud. Keep paragraph breaks. \
Respond with JSON containing `text` (the cleaned text) and `detectedLanguage` (the English name \
of the language the text is written in).";

const UNKNOWN_LANGUAGE: &str = "Unknown";

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("URL pattern is valid"));
static INLINE_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+").expect("whitespace pattern is valid"));
static LINE_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\n\s*").expect("line break pattern is valid"));

pub struct DocumentService {
    document_repo: Arc<dyn DocumentRepository>,
    language_detector: LanguageDetector,
    local_text_extraction: bool,
}

impl DocumentService {
    pub fn new(document_repo: Arc<dyn DocumentRepository>, local_text_extraction: bool) -> Self {
        Self {
            document_repo,
            language_detector: build_detector(),
            local_text_extraction,
        }
    }
}

#[async_trait]
pub trait DocumentServiceApi: Send + Sync {
    /// Turn an uploaded file into a cleaned [`Document`]
    ///
    /// Plain text and HTML are cleaned locally when enabled; everything else goes to the
    /// extraction provider with [`CLEANING_INSTRUCTION`].
    async fn extract(&self, file: &DocumentFile) -> Result<Document, ExtractionError>;
}

#[async_trait]
impl DocumentServiceApi for DocumentService {
    async fn extract(&self, file: &DocumentFile) -> Result<Document, ExtractionError> {
        tracing::info!(
            file_name = %file.file_name,
            mime_type = %file.mime_type,
            size_bytes = file.bytes.len(),
            "Extracting document"
        );

        let document = if self.local_text_extraction && file.is_text() {
            self.extract_locally(file)?
        } else {
            self.extract_remotely(file).await?
        };

        tracing::info!(
            text_length = document.text.len(),
            detected_language = %document.detected_language,
            "Document extracted"
        );

        Ok(document)
    }
}

impl DocumentService {
    fn extract_locally(&self, file: &DocumentFile) -> Result<Document, ExtractionError> {
        let raw = String::from_utf8(file.bytes.clone())?;
        let plain_text = if file.is_html() {
            from_read(raw.as_bytes(), usize::MAX)
        } else {
            raw
        };

        let text = clean_text(&plain_text);
        if text.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let detected_language = self.language_name(&text);
        Ok(Document {
            text,
            detected_language,
        })
    }

    async fn extract_remotely(&self, file: &DocumentFile) -> Result<Document, ExtractionError> {
        let document = self
            .document_repo
            .extract(file, CLEANING_INSTRUCTION)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, file_name = %file.file_name, "Remote extraction failed");
                ExtractionError::Dependency(e)
            })?;

        let text = document.text.trim().to_string();
        if text.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let detected_language = if document.detected_language.trim().is_empty() {
            tracing::warn!("Extraction returned no language, detecting locally");
            self.language_name(&text)
        } else {
            document.detected_language.trim().to_string()
        };

        Ok(Document {
            text,
            detected_language,
        })
    }

    fn language_name(&self, text: &str) -> String {
        match detect_language(&self.language_detector, text) {
            Some(language) => language.name().to_string(),
            None => {
                tracing::warn!("Could not detect language");
                UNKNOWN_LANGUAGE.to_string()
            }
        }
    }
}

/// Strip URLs and collapse whitespace, keeping single line breaks between paragraphs
pub fn clean_text(text: &str) -> String {
    let without_urls = URL_PATTERN.replace_all(text, "");
    let collapsed = INLINE_WHITESPACE.replace_all(&without_urls, " ");
    let normalized = LINE_BREAKS.replace_all(&collapsed, "\n");
    normalized.trim().to_string()
}
