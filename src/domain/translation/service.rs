use super::error::TranslationError;
use crate::infrastructure::repositories::TranslationRepository;
use async_trait::async_trait;
use std::sync::Arc;

const INFORMAL_REGISTER: &str = "Use natural, conversational everyday Hindi (Hinglish where it \
sounds natural) rather than formal or literary Hindi, as a friendly narrator would speak it.";

/// Build the instruction sent to the translation provider for a target language
pub fn translation_instruction(target_language: &str) -> String {
    let mut instruction = format!(
        "Translate the following text into {}. Preserve the meaning, tone and paragraph breaks. \
         Respond with the translated text only, without notes or explanations.",
        target_language
    );

    if target_language.to_lowercase().contains("hindi") {
        instruction.push(' ');
        instruction.push_str(INFORMAL_REGISTER);
    }

    instruction
}

pub struct TranslationService {
    translation_repo: Arc<dyn TranslationRepository>,
}

impl TranslationService {
    pub fn new(translation_repo: Arc<dyn TranslationRepository>) -> Self {
        Self { translation_repo }
    }
}

#[async_trait]
pub trait TranslationServiceApi: Send + Sync {
    /// Translate text into the target language
    ///
    /// Text already in the target language (per `source_language`) is returned unchanged
    /// without a request.
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError>;
}

#[async_trait]
impl TranslationServiceApi for TranslationService {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let target_language = target_language.trim();
        if target_language.is_empty() {
            return Err(TranslationError::Invalid(
                "target language cannot be empty".to_string(),
            ));
        }

        if source_language.trim().eq_ignore_ascii_case(target_language) {
            tracing::info!(
                language = target_language,
                "Document already in target language, skipping translation"
            );
            return Ok(text.to_string());
        }

        tracing::info!(
            source_language = source_language,
            target_language = target_language,
            text_length = text.len(),
            "Translating document"
        );

        let instruction = translation_instruction(target_language);
        let translated = self
            .translation_repo
            .translate(text, &instruction)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, target_language = target_language, "Translation failed");
                TranslationError::Dependency(e)
            })?;

        let translated = translated.trim().to_string();
        if translated.is_empty() {
            return Err(TranslationError::EmptyTranslation);
        }

        tracing::info!(
            translated_length = translated.len(),
            "Document translated"
        );

        Ok(translated)
    }
}
