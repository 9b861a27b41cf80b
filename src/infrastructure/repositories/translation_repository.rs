use async_trait::async_trait;

/// Repository for remote translation.
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Run a translation prompt and return the plain text answer
    ///
    /// # Errors
    /// Returns error if the request fails or the response carries no text
    async fn translate(&self, text: &str, instruction: &str) -> Result<String, String>;
}
