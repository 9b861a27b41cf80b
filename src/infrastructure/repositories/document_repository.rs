use crate::domain::document::{Document, DocumentFile};
use async_trait::async_trait;

/// Repository for remote document extraction.
///
/// The provider reads the file (PDF, DOCX, text), applies the cleaning instruction and
/// answers with the text and the language it detected.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Extract and clean the text of a document
    ///
    /// # Errors
    /// Returns error if the request fails or the response is not a valid document
    async fn extract(&self, file: &DocumentFile, instruction: &str) -> Result<Document, String>;
}
